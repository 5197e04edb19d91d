use super::{ChatService, Prompt};
use crate::models::{NormalizedResult, ResponseShape};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Blocked(String),
    Status(u16, String),
}

/// In-memory [`ChatService`] that records prompts and replays canned replies.
pub struct MockChatClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
    label: String,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            label: "mock-model".to_string(),
        }
    }

    pub fn with_label(mut self, label: String) -> Self {
        self.label = label;
        self
    }

    pub fn with_response(self, response: String) -> Self {
        self.push(MockReply::Text(response));
        self
    }

    pub fn with_blocked(self, reason: String) -> Self {
        self.push(MockReply::Blocked(reason));
        self
    }

    pub fn with_http_error(self, status: u16, body: String) -> Self {
        self.push(MockReply::Status(status, body));
        self
    }

    fn push(&self, reply: MockReply) {
        self.replies
            .lock()
            .expect("mock replies lock poisoned")
            .push(reply);
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().expect("mock prompts lock poisoned").len()
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts
            .lock()
            .expect("mock prompts lock poisoned")
            .last()
            .cloned()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    fn model_label(&self) -> &str {
        &self.label
    }

    async fn complete(&self, prompt: &Prompt) -> Result<NormalizedResult> {
        let count = {
            let mut prompts = self.prompts.lock().expect("mock prompts lock poisoned");
            prompts.push(prompt.clone());
            prompts.len()
        };

        let reply = {
            let replies = self.replies.lock().expect("mock replies lock poisoned");
            if replies.is_empty() {
                None
            } else {
                Some(replies[(count - 1) % replies.len()].clone())
            }
        };

        match reply {
            None => Ok(NormalizedResult {
                text: format!("Mock response to: {}", prompt.user_text()),
                shape: ResponseShape::ChatMessage,
            }),
            Some(MockReply::Text(text)) => Ok(NormalizedResult {
                text,
                shape: ResponseShape::ChatMessage,
            }),
            Some(MockReply::Blocked(reason)) => Err(Error::GenerationBlocked { reason }),
            Some(MockReply::Status(status, body)) => Err(Error::HttpStatus { status, body }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_echoes_prompt() {
        let client = MockChatClient::new();
        let result = client.complete(&Prompt::text("apples")).await.unwrap();
        assert!(result.text.contains("apples"));
    }

    #[tokio::test]
    async fn test_mock_custom_responses_cycle() {
        let client = MockChatClient::new()
            .with_response("first".to_string())
            .with_response("second".to_string());

        let prompt = Prompt::text("q");
        assert_eq!(client.complete(&prompt).await.unwrap().text, "first");
        assert_eq!(client.complete(&prompt).await.unwrap().text, "second");
        // Should cycle back
        assert_eq!(client.complete(&prompt).await.unwrap().text, "first");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_error_replies() {
        let client = MockChatClient::new()
            .with_blocked("SAFETY".to_string())
            .with_http_error(503, "unavailable".to_string());

        let prompt = Prompt::text("q");
        assert!(matches!(
            client.complete(&prompt).await,
            Err(Error::GenerationBlocked { .. })
        ));
        assert!(matches!(
            client.complete(&prompt).await,
            Err(Error::HttpStatus { status: 503, .. })
        ));
    }
}
