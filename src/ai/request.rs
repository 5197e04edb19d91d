//! Provider-agnostic prompt assembly.
//!
//! A [`Prompt`] is turned into an ordered message list; provider modules then
//! map those messages onto their own wire types.

use crate::models::{ContentPart, ImagePart, Message, MessageContent, Role};

/// How a target endpoint accepts the system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemRole {
    /// Sent as a leading `system` message.
    Message,
    /// Folded into the user text as a labeled prefix.
    Folded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    system_instruction: Option<String>,
    user_text: String,
    images: Vec<ImagePart>,
}

impl Prompt {
    pub fn new(
        system_instruction: Option<String>,
        user_text: impl Into<String>,
        images: Vec<ImagePart>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.filter(|s| !s.is_empty()),
            user_text: user_text.into(),
            images,
        }
    }

    pub fn text(user_text: impl Into<String>) -> Self {
        Self::new(None, user_text, Vec::new())
    }

    pub fn with_system(mut self, system_instruction: impl Into<String>) -> Self {
        let system_instruction = system_instruction.into();
        self.system_instruction = (!system_instruction.is_empty()).then_some(system_instruction);
        self
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn images(&self) -> &[ImagePart] {
        &self.images
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// Build the message list for a target with the given system-role support.
    ///
    /// With images, the user turn is `[Text, Image...]` in supplied order; an
    /// empty user text is omitted so the turn is image-only. This is the only
    /// part ever left out: images are never dropped, and non-empty text is
    /// always sent.
    pub fn build_messages(&self, system_role: SystemRole) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);

        let user_text = match (system_role, &self.system_instruction) {
            (SystemRole::Message, Some(system)) => {
                messages.push(Message {
                    role: Role::System,
                    content: MessageContent::Text(system.clone()),
                });
                self.user_text.clone()
            }
            (SystemRole::Folded, Some(system)) => fold_system(system, &self.user_text),
            (_, None) => self.user_text.clone(),
        };

        let content = if self.images.is_empty() {
            MessageContent::Text(user_text)
        } else {
            let mut parts = Vec::with_capacity(self.images.len() + 1);
            if !user_text.is_empty() {
                parts.push(ContentPart::Text(user_text));
            }
            parts.extend(self.images.iter().cloned().map(ContentPart::Image));
            MessageContent::Parts(parts)
        };

        messages.push(Message {
            role: Role::User,
            content,
        });
        messages
    }
}

fn fold_system(system: &str, user_text: &str) -> String {
    format!("System: {}\n\nUser: {}", system, user_text)
}
