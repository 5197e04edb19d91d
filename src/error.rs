//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror. Domain
//! outcomes (the model declining to answer) are kept apart from faults
//! (network, status, parse) so callers can match on them directly.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {variable} {message}")]
    Configuration { variable: String, message: String },

    #[error("Image file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {endpoint} (status {status}): {source}")]
    ResponseBody {
        endpoint: String,
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error (status {status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response body (status {status}): {source}. Body: {body}")]
    MalformedBody {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unrecognized response shape: {0}")]
    UnrecognizedResponseShape(serde_json::Value),

    #[error("Generation stopped due to: {reason}")]
    GenerationBlocked { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a required variable that was absent or empty.
    pub fn missing_config(variable: &str) -> Self {
        Self::Configuration {
            variable: variable.to_string(),
            message: "environment variable not set".to_string(),
        }
    }

    /// True for outcomes where the provider answered but declined to produce
    /// text. Everything else is a fault.
    pub fn is_domain_outcome(&self) -> bool {
        matches!(self, Self::GenerationBlocked { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
