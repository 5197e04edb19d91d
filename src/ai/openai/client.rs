use super::types::ChatCompletionRequest;
use crate::ai::{normalize, timeout_for, ChatService, HttpTransport, Prompt, SystemRole};
use crate::config::{self, AzureLlamaConfig, AzureOpenAiConfig};
use crate::models::{GenerationConfig, NormalizedResult};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

/// Chat client for OpenAI-compatible endpoints (Azure OpenAI deployments and
/// Azure AI serverless Llama endpoints).
pub struct OpenAiChatClient {
    transport: HttpTransport,
    endpoint: String,
    headers: HeaderMap,
    label: String,
    generation: GenerationConfig,
}

impl OpenAiChatClient {
    /// Azure OpenAI deployment, authenticated with the `api-key` header.
    pub fn azure_openai(config: &AzureOpenAiConfig) -> Result<Self> {
        Self::azure_openai_with_client(config, reqwest::Client::new())
    }

    pub fn azure_openai_with_client(
        config: &AzureOpenAiConfig,
        client: reqwest::Client,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("api-key"),
            header_value(&config.api_key, config::AZURE_OPENAI_API_KEY)?,
        );

        Ok(Self {
            transport: HttpTransport::new_with_client(client),
            endpoint: config.chat_completions_url(),
            headers,
            label: format!("{} (via Azure OpenAI)", config.deployment),
            generation: GenerationConfig::chat_default(),
        })
    }

    /// Azure AI serverless endpoint, authenticated with a bearer token.
    pub fn azure_llama(config: &AzureLlamaConfig) -> Result<Self> {
        Self::azure_llama_with_client(config, reqwest::Client::new())
    }

    pub fn azure_llama_with_client(
        config: &AzureLlamaConfig,
        client: reqwest::Client,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header_value(
                &format!("Bearer {}", config.api_key),
                config::AZURE_AI_LLAMA_API_KEY,
            )?,
        );

        Ok(Self {
            transport: HttpTransport::new_with_client(client),
            endpoint: config.endpoint_url.clone(),
            headers,
            label: format!("{} (via Azure AI)", config.model_name),
            generation: GenerationConfig::chat_default(),
        })
    }

    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }
}

fn header_value(value: &str, variable: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(|_| Error::Configuration {
        variable: variable.to_string(),
        message: "contains characters not allowed in an HTTP header".to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

#[async_trait]
impl ChatService for OpenAiChatClient {
    fn model_label(&self) -> &str {
        &self.label
    }

    async fn complete(&self, prompt: &Prompt) -> Result<NormalizedResult> {
        let messages = prompt.build_messages(SystemRole::Message);
        let request = ChatCompletionRequest::new(&messages, &self.generation);

        tracing::debug!(
            "Sending chat completion to {} ({} messages, {} images)",
            self.endpoint,
            request.messages.len(),
            prompt.images().len()
        );

        let raw = self
            .transport
            .invoke(
                &self.endpoint,
                self.headers.clone(),
                &request,
                timeout_for(prompt),
            )
            .await?;

        normalize::extract(raw)
    }
}
