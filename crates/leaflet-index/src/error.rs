use std::path::PathBuf;

use leaflet_llm::LlmError;
use thiserror::Error;

use crate::document::DocumentError;

/// Errors from indexing, persistence, and retrieval.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Filesystem access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store files could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A brochure could not be loaded or split.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// The embedding provider failed.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// A vector's length differs from the rest of the store.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// No saved store exists at the given directory.
    #[error("vector store not found at {}", .0.display())]
    StoreNotFound(PathBuf),

    /// The store files disagree with each other.
    #[error("corrupt vector store: {0}")]
    CorruptStore(String),
}

/// Convenience alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
