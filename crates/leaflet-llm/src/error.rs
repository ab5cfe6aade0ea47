use thiserror::Error;

/// Errors surfaced by chat and embedding backends.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("empty response from {provider}")]
    EmptyResponse { provider: &'static str },

    #[error("provider {provider} does not support embeddings")]
    EmbedUnsupported { provider: &'static str },

    #[error("provider {provider} does not support chat")]
    ChatUnsupported { provider: &'static str },

    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[cfg(feature = "candle")]
    #[error("candle error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;
