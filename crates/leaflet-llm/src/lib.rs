//! Chat and embedding providers for leaflet.
//!
//! [`OllamaProvider`] talks to a local Ollama server for both chat and
//! embeddings. [`CandleProvider`] (behind the `candle` feature) runs a BERT
//! sentence encoder in-process and needs no server at all. [`AnyProvider`]
//! dispatches between the configured backends without trait objects.

pub mod any;
#[cfg(feature = "candle")]
pub mod candle_provider;
mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod ollama;
pub mod provider;

pub use any::AnyProvider;
#[cfg(feature = "candle")]
pub use candle_provider::CandleProvider;
pub use error::LlmError;
#[cfg(feature = "mock")]
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use provider::{LlmProvider, Message, Role};
