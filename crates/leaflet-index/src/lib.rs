//! Brochure indexing and semantic retrieval: load -> chunk -> embed -> store.
//!
//! The index is a flat vector store persisted as two JSON files
//! (`metadata.json` with chunk records, `embeddings.json` with vectors).
//! Retrieval embeds the query with the same provider that built the store
//! and ranks chunks by cosine similarity.

pub mod document;
mod error;
pub mod indexer;
pub mod retriever;
pub mod store;

pub use document::{
    Chunk, Document, DocumentError, DocumentLoader, SplitterConfig, TextLoader, TextSplitter,
    scan_brochures,
};
pub use error::{IndexError, Result};
pub use indexer::{BrochureIndexer, IndexReport};
pub use retriever::{RetrievalConfig, Retriever, SearchHit};
pub use store::{ChunkRecord, ChunkStore};

#[cfg(feature = "pdf")]
pub use document::PdfLoader;
