//! Provider configuration
//!
//! Each provider's settings are read once at startup into an explicit value
//! and passed by reference to the client that needs them. Nothing below the
//! binaries reads the environment.

use crate::{Error, Result};

pub const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const AZURE_OPENAI_DEPLOYMENT_NAME: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
pub const AZURE_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";

pub const AZURE_AI_LLAMA_ENDPOINT_URL: &str = "AZURE_AI_LLAMA_ENDPOINT_URL";
pub const AZURE_AI_LLAMA_API_KEY: &str = "AZURE_AI_LLAMA_API_KEY";
pub const AZURE_AI_LLAMA_MODEL_NAME: &str = "AZURE_AI_LLAMA_MODEL_NAME";

pub const GOOGLE_CLOUD_PROJECT: &str = "GOOGLE_CLOUD_PROJECT";
pub const VERTEX_AI_ACCESS_TOKEN: &str = "VERTEX_AI_ACCESS_TOKEN";
pub const VERTEX_AI_LOCATION: &str = "VERTEX_AI_LOCATION";
pub const VERTEX_AI_MODEL: &str = "VERTEX_AI_MODEL";
pub const VERTEX_AI_API_ENDPOINT: &str = "VERTEX_AI_API_ENDPOINT";

pub const DEFAULT_VERTEX_LOCATION: &str = "us-central1";

/// Load `.env` (if present) and return a lookup over the process environment.
pub fn env_lookup() -> impl Fn(&str) -> Option<String> {
    dotenvy::dotenv().ok();
    |key: &str| std::env::var(key).ok()
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing_config(key))
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl AzureOpenAiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            endpoint: required(&lookup, AZURE_OPENAI_ENDPOINT)?
                .trim_end_matches('/')
                .to_string(),
            api_key: required(&lookup, AZURE_OPENAI_API_KEY)?,
            deployment: optional(&lookup, AZURE_OPENAI_DEPLOYMENT_NAME, "gpt-4-vision"),
            api_version: optional(&lookup, AZURE_OPENAI_API_VERSION, "2024-02-15-preview"),
        })
    }

    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

#[derive(Debug, Clone)]
pub struct AzureLlamaConfig {
    pub endpoint_url: String,
    pub api_key: String,
    pub model_name: String,
}

impl AzureLlamaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            endpoint_url: required(&lookup, AZURE_AI_LLAMA_ENDPOINT_URL)?,
            api_key: required(&lookup, AZURE_AI_LLAMA_API_KEY)?,
            model_name: optional(&lookup, AZURE_AI_LLAMA_MODEL_NAME, "Llama-3"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct VertexConfig {
    pub project: String,
    pub access_token: String,
    pub location: String,
    pub model: String,
    pub api_endpoint: String,
}

impl VertexConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let project = required(&lookup, GOOGLE_CLOUD_PROJECT)?;
        let access_token = required(&lookup, VERTEX_AI_ACCESS_TOKEN)?;
        let location = Self::location_from_lookup(&lookup);
        let model = optional(&lookup, VERTEX_AI_MODEL, "gemini-1.5-pro");
        let api_endpoint = optional(
            &lookup,
            VERTEX_AI_API_ENDPOINT,
            &regional_endpoint(&location),
        )
        .trim_end_matches('/')
        .to_string();

        Ok(Self {
            project,
            access_token,
            location,
            model,
            api_endpoint,
        })
    }

    /// `VERTEX_AI_LOCATION`, or the default region when absent or blank.
    pub fn location_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> String {
        optional(&lookup, VERTEX_AI_LOCATION, DEFAULT_VERTEX_LOCATION)
    }

    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.api_endpoint, self.project, self.location, self.model
        )
    }
}

/// Regional Vertex AI API host for `location`.
pub fn regional_endpoint(location: &str) -> String {
    format!("https://{}-aiplatform.googleapis.com", location)
}
