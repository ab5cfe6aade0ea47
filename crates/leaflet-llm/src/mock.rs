use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::{LlmProvider, Message};

const DEFAULT_EMBEDDING_DIM: usize = 32;

/// Scripted provider for tests.
///
/// Chat replies are drained from a queue, falling back to a fixed default.
/// Embeddings are deterministic: keyword rules win first, otherwise a
/// normalized byte histogram of the input, so the same text always maps to
/// the same vector and retrieval ordering is reproducible.
#[derive(Debug, Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    default_response: String,
    embedding_rules: Vec<(String, Vec<f32>)>,
    embedding_dim: usize,
    supports_embeddings: bool,
    fail_chat: bool,
    fail_embed: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock response".to_owned(),
            embedding_rules: Vec::new(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            supports_embeddings: true,
            fail_chat: false,
            fail_embed: false,
        }
    }

    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::new()
        }
    }

    /// Map any text containing `keyword` (case-insensitive) to `vector`.
    /// Rules are checked in insertion order.
    #[must_use]
    pub fn with_embedding_rule(mut self, keyword: &str, vector: Vec<f32>) -> Self {
        self.embedding_rules.push((keyword.to_lowercase(), vector));
        self
    }

    #[must_use]
    pub fn without_embeddings(mut self) -> Self {
        self.supports_embeddings = false;
        self
    }

    #[must_use]
    pub fn failing_chat(mut self) -> Self {
        self.fail_chat = true;
        self
    }

    #[must_use]
    pub fn failing_embeddings(mut self) -> Self {
        self.fail_embed = true;
        self
    }
}

impl LlmProvider for MockProvider {
    async fn chat(&self, _messages: &[Message]) -> Result<String, LlmError> {
        if self.fail_chat {
            return Err(LlmError::Other("mock chat failure".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        if self.fail_embed {
            return Err(LlmError::Other("mock embed failure".into()));
        }
        if !self.supports_embeddings {
            return Err(LlmError::EmbedUnsupported { provider: "mock" });
        }
        let lower = text.to_lowercase();
        for (keyword, vector) in &self.embedding_rules {
            if lower.contains(keyword) {
                return Ok(vector.clone());
            }
        }
        Ok(byte_histogram(text, self.embedding_dim))
    }

    fn supports_embeddings(&self) -> bool {
        self.supports_embeddings
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }
}

fn byte_histogram(text: &str, dim: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dim];
    for byte in text.bytes() {
        vector[usize::from(byte) % dim] += 1.0;
    }
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}
