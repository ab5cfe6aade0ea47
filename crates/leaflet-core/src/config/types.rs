use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub answer: AnswerConfig,
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

/// Embedding/chat backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Ollama,
    Candle,
}

impl ProviderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Candle => "candle",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candle: Option<CandleConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            embedding_model: default_embedding_model(),
            candle: None,
        }
    }
}

fn default_provider() -> ProviderKind {
    ProviderKind::Ollama
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}

fn default_model() -> String {
    "mistral:7b".into()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CandleConfig {
    #[serde(default = "default_embedding_repo")]
    pub embedding_repo: String,
}

impl Default for CandleConfig {
    fn default() -> Self {
        Self {
            embedding_repo: default_embedding_repo(),
        }
    }
}

fn default_embedding_repo() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DocumentsConfig {
    #[serde(default = "default_brochures_dir")]
    pub brochures_dir: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            brochures_dir: default_brochures_dir(),
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_brochures_dir() -> String {
    "data/brochures".into()
}

fn default_max_file_size() -> u64 {
    50 * 1024 * 1024
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IndexConfig {
    #[serde(default = "default_store_dir")]
    pub store_dir: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_store_dir() -> String {
    "vector_store".into()
}

fn default_chunk_size() -> usize {
    800
}

fn default_chunk_overlap() -> usize {
    200
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub score_threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            score_threshold: 0.0,
        }
    }
}

fn default_top_k() -> usize {
    3
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AnswerConfig {
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            max_sentences: default_max_sentences(),
        }
    }
}

fn default_max_chunk_chars() -> usize {
    600
}

fn default_max_sentences() -> usize {
    3
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RewriteConfig {
    #[serde(default)]
    pub enabled: bool,
}
