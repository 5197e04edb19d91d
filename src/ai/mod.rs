//! LLM provider integration
//!
//! Prompts are assembled by [`request`], sent once through [`transport`], and
//! the raw JSON answer is reduced to text by [`normalize`]. Provider modules
//! only decide the payload shape, endpoint and auth headers.

pub mod encoder;
pub mod mime;
pub mod mock;
pub mod normalize;
pub mod openai;
pub mod request;
pub mod transport;
pub mod vertex;

pub use encoder::encode_image;
pub use mock::MockChatClient;
pub use openai::OpenAiChatClient;
pub use request::{Prompt, SystemRole};
pub use transport::HttpTransport;
pub use vertex::VertexChatClient;

use crate::models::NormalizedResult;
use crate::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";
pub const DEFAULT_IMAGE_SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that can analyze images.";
pub const DEFAULT_IMAGE_PROMPT: &str = "What do you see in this image?";

/// Timeout for text-only requests.
pub const TEXT_TIMEOUT: Duration = Duration::from_secs(90);
/// Timeout for requests that carry images.
pub const VISION_TIMEOUT: Duration = Duration::from_secs(120);

pub fn timeout_for(prompt: &Prompt) -> Duration {
    if prompt.has_images() {
        VISION_TIMEOUT
    } else {
        TEXT_TIMEOUT
    }
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Human-readable model name for headers and logs.
    fn model_label(&self) -> &str;

    /// Send one prompt and return the normalized assistant text.
    async fn complete(&self, prompt: &Prompt) -> Result<NormalizedResult>;
}

pub async fn send_text(
    service: &dyn ChatService,
    system_instruction: &str,
    text: &str,
) -> Result<NormalizedResult> {
    let prompt = Prompt::text(text).with_system(system_instruction);
    service.complete(&prompt).await
}

/// Send one image with a text prompt. The image is encoded before any
/// request is made.
pub async fn send_image(
    service: &dyn ChatService,
    system_instruction: &str,
    image_path: &Path,
    text_prompt: &str,
) -> Result<NormalizedResult> {
    let image = encode_image(image_path).await?;
    let prompt = Prompt::new(Some(system_instruction.to_string()), text_prompt, vec![image]);
    service.complete(&prompt).await
}

/// Send text with any number of images, preserving image order.
pub async fn send_multimodal(
    service: &dyn ChatService,
    system_instruction: &str,
    text: &str,
    image_paths: &[PathBuf],
) -> Result<NormalizedResult> {
    let mut images = Vec::with_capacity(image_paths.len());
    for path in image_paths {
        images.push(encode_image(path).await?);
    }
    let prompt = Prompt::new(Some(system_instruction.to_string()), text, images);
    service.complete(&prompt).await
}

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::MockBuilder;

    pub const AZURE_CHAT_PATH: &str = "/openai/deployments/gpt-4o/chat/completions";
    pub const LLAMA_SCORE_PATH: &str = "/v1/chat/completions";
    pub const VERTEX_GENERATE_PATH_REGEX: &str =
        r"^/v1/projects/[^/]+/locations/[^/]+/publishers/google/models/.+:generateContent$";

    pub fn post(p: &str) -> MockBuilder {
        wiremock::Mock::given(method("POST")).and(path(p))
    }

    pub fn post_path_regex(p: &str) -> MockBuilder {
        wiremock::Mock::given(method("POST")).and(path_regex(p))
    }

    /// Writes a small PNG-named file and returns its path.
    pub fn write_image(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}
