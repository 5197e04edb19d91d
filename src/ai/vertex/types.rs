//! Vertex `generateContent` request payloads.
//!
//! Responses are not deserialized into fixed types; they go through the
//! shape normalizer as raw JSON.

use crate::models::{ContentPart, GenerationConfig, Message, MessageContent};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: VertexGenerationConfig,
}

impl GenerateContentRequest {
    pub fn new(messages: &[Message], generation: &GenerationConfig) -> Self {
        Self {
            contents: messages.iter().map(Content::from).collect(),
            generation_config: VertexGenerationConfig::from(generation),
        }
    }
}

/// Vertex content container.
#[derive(Debug, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

impl From<&Message> for Content {
    fn from(message: &Message) -> Self {
        let parts = match &message.content {
            MessageContent::Text(text) => vec![Part::Text { text: text.clone() }],
            MessageContent::Parts(parts) => parts
                .iter()
                .map(|part| match part {
                    ContentPart::Text(text) => Part::Text { text: text.clone() },
                    ContentPart::Image(image) => Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.to_string(),
                            data: image.data.clone(),
                        },
                    },
                })
                .collect(),
        };

        Self {
            role: message.role.as_str(),
            parts,
        }
    }
}

/// Untagged union of text and inline media content parts.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload used for image requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexGenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl From<&GenerationConfig> for VertexGenerationConfig {
    fn from(generation: &GenerationConfig) -> Self {
        Self {
            max_output_tokens: generation.max_tokens,
            temperature: generation.temperature,
            top_p: generation.top_p,
            top_k: generation.top_k,
        }
    }
}
