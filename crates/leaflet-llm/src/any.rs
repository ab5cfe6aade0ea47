use crate::error::LlmError;
use crate::ollama::OllamaProvider;
use crate::provider::{LlmProvider, Message};

#[cfg(feature = "candle")]
use crate::candle_provider::CandleProvider;
#[cfg(feature = "mock")]
use crate::mock::MockProvider;

/// Concrete dispatch over the configured provider backends.
///
/// Keeps call sites monomorphic while letting the binary pick the backend
/// from configuration at startup.
#[derive(Debug, Clone)]
pub enum AnyProvider {
    Ollama(OllamaProvider),
    #[cfg(feature = "candle")]
    Candle(CandleProvider),
    #[cfg(feature = "mock")]
    Mock(MockProvider),
}

macro_rules! delegate_provider {
    ($self:expr, $provider:pat => $body:expr) => {
        match $self {
            AnyProvider::Ollama($provider) => $body,
            #[cfg(feature = "candle")]
            AnyProvider::Candle($provider) => $body,
            #[cfg(feature = "mock")]
            AnyProvider::Mock($provider) => $body,
        }
    };
}

impl AnyProvider {
    /// Probe the configured backend once at startup.
    ///
    /// Ollama checks that the server answers; the in-process backends are
    /// ready as soon as they are constructed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    pub async fn health_check(&self) -> Result<(), LlmError> {
        match self {
            AnyProvider::Ollama(p) => p.health_check().await,
            #[cfg(feature = "candle")]
            AnyProvider::Candle(_) => Ok(()),
            #[cfg(feature = "mock")]
            AnyProvider::Mock(_) => Ok(()),
        }
    }
}

impl LlmProvider for AnyProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        delegate_provider!(self, p => p.chat(messages).await)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        delegate_provider!(self, p => p.embed(text).await)
    }

    fn supports_chat(&self) -> bool {
        delegate_provider!(self, p => p.supports_chat())
    }

    fn supports_embeddings(&self) -> bool {
        delegate_provider!(self, p => p.supports_embeddings())
    }

    fn name(&self) -> &str {
        delegate_provider!(self, p => p.name())
    }
}
