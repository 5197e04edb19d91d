//! Thin adapter over hosted LLM chat APIs
//!
//! Sends text or text+image prompts to Azure OpenAI, Azure AI serverless
//! Llama endpoints and Google Vertex AI, and reduces their differently shaped
//! JSON answers to plain text. Also includes an EU data-residency report for
//! Vertex AI deployments.

pub mod ai;
pub mod config;
pub mod error;
pub mod menu;
pub mod models;
pub mod provider;
pub mod residency;

pub use error::{Error, Result};
