use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Backend-agnostic interface over chat completion and text embeddings.
///
/// Every backend must embed; chat is optional (the candle backend is an
/// embedding-only encoder) and callers should consult [`supports_chat`]
/// before routing a conversation.
///
/// [`supports_chat`]: LlmProvider::supports_chat
pub trait LlmProvider: Send + Sync {
    /// Send a conversation and return the assistant reply.
    fn chat(&self, messages: &[Message]) -> impl Future<Output = Result<String, LlmError>> + Send;

    /// Embed a single text into a vector.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, LlmError>> + Send;

    fn supports_chat(&self) -> bool {
        true
    }

    fn supports_embeddings(&self) -> bool {
        false
    }

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn message_new_accepts_str_and_string() {
        let a = Message::new(Role::User, "hello");
        let b = Message::new(Role::User, String::from("hello"));
        assert_eq!(a.content, b.content);
    }
}
