//! In-process embedding backend built on candle.
//!
//! Runs a BERT sentence encoder (by default `all-MiniLM-L6-v2`) on the CPU.
//! No chat model is bundled, so [`CandleProvider::chat`] always fails and
//! answer rewriting requires the Ollama backend instead.

mod embed;

pub use embed::EmbedModel;

use std::sync::Arc;

use candle_core::Device;

use crate::error::LlmError;
use crate::provider::{LlmProvider, Message};

#[derive(Clone)]
pub struct CandleProvider {
    embed_model: Arc<EmbedModel>,
    device: Device,
}

impl std::fmt::Debug for CandleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleProvider")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl CandleProvider {
    /// Download (or reuse from cache) and load the embedding model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model files cannot be fetched or loaded.
    pub fn new(embedding_repo: &str) -> Result<Self, LlmError> {
        let device = Device::Cpu;
        let embed_model = EmbedModel::load(embedding_repo, &device)?;
        Ok(Self {
            embed_model: Arc::new(embed_model),
            device,
        })
    }

    #[must_use]
    pub fn device_name(&self) -> &'static str {
        match &self.device {
            Device::Cpu => "cpu",
            Device::Cuda(_) => "cuda",
            Device::Metal(_) => "metal",
        }
    }
}

impl LlmProvider for CandleProvider {
    async fn chat(&self, _messages: &[Message]) -> Result<String, LlmError> {
        Err(LlmError::ChatUnsupported { provider: "candle" })
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let model = Arc::clone(&self.embed_model);
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || model.embed_sync(&text))
            .await
            .map_err(|e| LlmError::Inference(format!("embedding task panicked: {e}")))?
    }

    fn supports_chat(&self) -> bool {
        false
    }

    fn supports_embeddings(&self) -> bool {
        true
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "candle"
    }
}
