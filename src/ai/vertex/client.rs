use super::types::GenerateContentRequest;
use crate::ai::{normalize, timeout_for, ChatService, HttpTransport, Prompt, SystemRole};
use crate::config::{self, VertexConfig};
use crate::models::{GenerationConfig, NormalizedResult};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Vertex AI `generateContent` client.
///
/// The system instruction is folded into the user turn rather than sent as a
/// separate field.
pub struct VertexChatClient {
    transport: HttpTransport,
    endpoint: String,
    headers: HeaderMap,
    label: String,
    generation: GenerationConfig,
}

impl VertexChatClient {
    pub fn new(config: &VertexConfig) -> Result<Self> {
        Self::new_with_client(config, reqwest::Client::new())
    }

    pub fn new_with_client(config: &VertexConfig, client: reqwest::Client) -> Result<Self> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|_| Error::Configuration {
                variable: config::VERTEX_AI_ACCESS_TOKEN.to_string(),
                message: "contains characters not allowed in an HTTP header".to_string(),
            })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            transport: HttpTransport::new_with_client(client),
            endpoint: config.generate_content_url(),
            headers,
            label: config.model.clone(),
            generation: GenerationConfig::vertex_default(),
        })
    }

    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }
}

#[async_trait]
impl ChatService for VertexChatClient {
    fn model_label(&self) -> &str {
        &self.label
    }

    async fn complete(&self, prompt: &Prompt) -> Result<NormalizedResult> {
        let messages = prompt.build_messages(SystemRole::Folded);
        let request = GenerateContentRequest::new(&messages, &self.generation);

        tracing::debug!(
            "Sending request to Vertex AI model {} ({} images, maxOutputTokens {})",
            self.label,
            prompt.images().len(),
            self.generation.max_tokens
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
