//! Data models and structures
//!
//! Provider-agnostic message, content-part and generation-config types that
//! the request builders and provider clients share.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Base64 image payload ready to embed in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: &'static str,
    pub data: String,
}

impl ImagePart {
    /// `data:` URL form used by OpenAI-compatible payloads.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image(ImagePart),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    pub fn image_count(&self) -> usize {
        match self {
            MessageContent::Text(_) => 0,
            MessageContent::Parts(parts) => parts
                .iter()
                .filter(|p| matches!(p, ContentPart::Image(_)))
                .count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

/// Sampling parameters forwarded to the provider as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub top_k: Option<u32>,
}

impl GenerationConfig {
    /// Defaults used for the OpenAI-compatible chat endpoints.
    pub fn chat_default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
            top_p: 0.9,
            top_k: None,
        }
    }

    /// Defaults used for Vertex `generateContent`.
    pub fn vertex_default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 0.8,
            top_k: Some(40),
        }
    }
}

/// Which known response layout the text was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    ChatMessage,
    LegacyCompletion,
    Output,
    GeneratedText,
    VertexCandidates,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseShape::ChatMessage => "choices[0].message.content",
            ResponseShape::LegacyCompletion => "choices[0].text",
            ResponseShape::Output => "output",
            ResponseShape::GeneratedText => "[0].generated_text",
            ResponseShape::VertexCandidates => "candidates[0].content.parts",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedResult {
    pub text: String,
    pub shape: ResponseShape,
}
