//! Semantic retrieval over a [`ChunkStore`].

use std::sync::Arc;

use leaflet_llm::LlmProvider;

use crate::error::{IndexError, Result};
use crate::store::ChunkStore;

/// Retrieval tuning knobs.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Maximum hits to return.
    pub top_k: usize,
    /// Hits scoring below this are dropped after the top-k cut.
    /// `0.0` disables the filter.
    pub score_threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            score_threshold: 0.0,
        }
    }
}

/// One retrieved chunk.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub filename: String,
    pub chunk_index: usize,
    pub text: String,
    pub score: f32,
}

/// Ranks stored chunks by cosine similarity against an embedded query.
pub struct Retriever<P: LlmProvider> {
    store: ChunkStore,
    provider: Arc<P>,
    config: RetrievalConfig,
}

impl<P: LlmProvider> Retriever<P> {
    #[must_use]
    pub fn new(store: ChunkStore, provider: Arc<P>, config: RetrievalConfig) -> Self {
        Self {
            store,
            provider,
            config,
        }
    }

    #[must_use]
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// Return the `top_k` most similar chunks, best first.
    ///
    /// Ties keep store order. An empty store yields an empty result rather
    /// than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding the query fails or its dimension does
    /// not match the store.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchHit>> {
        if self.store.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self.provider.embed(query).await?;
        if let Some(dim) = self.store.dimension()
            && dim != query_vec.len()
        {
            return Err(IndexError::DimensionMismatch {
                expected: dim,
                got: query_vec.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .store
            .embeddings()
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(&query_vec, v)))
            .collect();

        // stable sort keeps store order for equal scores
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let k = self.config.top_k.min(scored.len());
        let mut hits: Vec<SearchHit> = scored[..k]
            .iter()
            .map(|&(i, score)| {
                let record = &self.store.records()[i];
                SearchHit {
                    filename: record.filename.clone(),
                    chunk_index: record.chunk_index,
                    text: record.text.clone(),
                    score,
                }
            })
            .collect();

        if self.config.score_threshold > 0.0 {
            hits.retain(|h| h.score >= self.config.score_threshold);
        }

        tracing::debug!(
            query_len = query.len(),
            hits = hits.len(),
            top_score = hits.first().map(|h| h.score),
            "retrieval complete"
        );

        Ok(hits)
    }
}

/// Cosine similarity; `0.0` when either vector has zero norm.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
