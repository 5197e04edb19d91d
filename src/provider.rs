//! Provider selection and client construction.

use crate::ai::{ChatService, OpenAiChatClient, VertexChatClient};
use crate::config::{AzureLlamaConfig, AzureOpenAiConfig, VertexConfig};
use crate::Result;
use clap::ValueEnum;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// Azure OpenAI chat deployment (text and vision).
    AzureOpenai,
    /// Llama 3 serverless endpoint in Azure AI.
    AzureLlama,
    /// Google Vertex AI generative model.
    Vertex,
}

/// Configuration for exactly one provider, loaded once at startup.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    AzureOpenAi(AzureOpenAiConfig),
    AzureLlama(AzureLlamaConfig),
    Vertex(VertexConfig),
}

impl ProviderConfig {
    pub fn from_env(provider: Provider) -> Result<Self> {
        Self::from_lookup(provider, crate::config::env_lookup())
    }

    pub fn from_lookup(
        provider: Provider,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        Ok(match provider {
            Provider::AzureOpenai => Self::AzureOpenAi(AzureOpenAiConfig::from_lookup(lookup)?),
            Provider::AzureLlama => Self::AzureLlama(AzureLlamaConfig::from_lookup(lookup)?),
            Provider::Vertex => Self::Vertex(VertexConfig::from_lookup(lookup)?),
        })
    }

    /// Lines describing the target, printed before the menu.
    pub fn describe(&self) -> Vec<String> {
        match self {
            Self::AzureOpenAi(c) => vec![
                format!("Using {} (via Azure OpenAI)", c.deployment),
                format!("Endpoint: {}", c.endpoint),
            ],
            Self::AzureLlama(c) => vec![
                format!("Using Azure AI Studio - {}", c.model_name),
                format!("Endpoint: {}", c.endpoint_url),
            ],
            Self::Vertex(c) => vec![
                format!("Using Google Vertex AI - {}", c.model),
                format!("Project: {}", c.project),
                format!("Location: {}", c.location),
            ],
        }
    }

    pub fn build_service(&self, http_client: reqwest::Client) -> Result<Box<dyn ChatService>> {
        let service: Box<dyn ChatService> = match self {
            Self::AzureOpenAi(config) => {
                info!("Chat provider: Azure OpenAI (deployment: {})", config.deployment);
                Box::new(OpenAiChatClient::azure_openai_with_client(
                    config,
                    http_client,
                )?)
            }
            Self::AzureLlama(config) => {
                info!("Chat provider: Azure AI Llama (model: {})", config.model_name);
                Box::new(OpenAiChatClient::azure_llama_with_client(
                    config,
                    http_client,
                )?)
            }
            Self::Vertex(config) => {
                info!(
                    "Chat provider: Vertex AI (model: {}, location: {})",
                    config.model, config.location
                );
                Box::new(VertexChatClient::new_with_client(config, http_client)?)
            }
        };
        Ok(service)
    }
}
