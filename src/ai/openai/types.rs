//! OpenAI-compatible chat-completions payloads used by the Azure clients.

use crate::models::{ContentPart, GenerationConfig, Message, MessageContent};
use serde::Serialize;

/// Request body for OpenAI-style chat completions.
///
/// Azure deployments select the model from the URL, so no `model` field is
/// sent.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl ChatCompletionRequest {
    pub fn new(messages: &[Message], generation: &GenerationConfig) -> Self {
        Self {
            messages: messages.iter().map(ChatMessage::from).collect(),
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
            top_p: generation.top_p,
        }
    }
}

/// OpenAI message content union.
///
/// Variant order matters for `#[serde(untagged)]`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatMessageContent {
    Text(String),
    Parts(Vec<MessagePart>),
}

/// One content segment in multipart message input.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Image URL wrapper for OpenAI message payloads.
#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Chat message object.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: ChatMessageContent,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        let content = match &message.content {
            MessageContent::Text(text) => ChatMessageContent::Text(text.clone()),
            MessageContent::Parts(parts) => ChatMessageContent::Parts(
                parts
                    .iter()
                    .map(|part| match part {
                        ContentPart::Text(text) => MessagePart::Text { text: text.clone() },
                        ContentPart::Image(image) => MessagePart::ImageUrl {
                            image_url: ImageUrl {
                                url: image.data_url(),
                            },
                        },
                    })
                    .collect(),
            ),
        };

        Self {
            role: message.role.as_str(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::request::{Prompt, SystemRole};
    use crate::models::ImagePart;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_text_request_serialization() {
        let messages = Prompt::text("Why is the sky blue?")
            .with_system("Be brief.")
            .build_messages(SystemRole::Message);
        let request = ChatCompletionRequest::new(&messages, &GenerationConfig::chat_default());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "messages": [
                    { "role": "system", "content": "Be brief." },
                    { "role": "user", "content": "Why is the sky blue?" }
                ],
                "temperature": 0.7,
                "max_tokens": 500,
                "top_p": 0.9
            })
        );
    }

    #[test]
    fn test_multimodal_parts_serialization() {
        let image = ImagePart {
            mime_type: "image/webp",
            data: "UklGRg==".to_string(),
        };
        let messages =
            Prompt::new(None, "What is this?", vec![image]).build_messages(SystemRole::Message);
        let request = ChatCompletionRequest::new(&messages, &GenerationConfig::chat_default());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["messages"][0]["content"],
            json!([
                { "type": "text", "text": "What is this?" },
                { "type": "image_url", "image_url": { "url": "data:image/webp;base64,UklGRg==" } }
            ])
        );
    }
}
