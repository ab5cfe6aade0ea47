use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("LEAFLET_LLM_PROVIDER") {
            if let Ok(kind) = serde_json::from_value(serde_json::Value::String(v.clone())) {
                self.llm.provider = kind;
            } else {
                tracing::warn!("ignoring invalid LEAFLET_LLM_PROVIDER value: {v}");
            }
        }
        if let Ok(v) = std::env::var("LEAFLET_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("LEAFLET_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("LEAFLET_LLM_EMBEDDING_MODEL") {
            self.llm.embedding_model = v;
        }
        if let Ok(v) = std::env::var("LEAFLET_BROCHURES_DIR") {
            self.documents.brochures_dir = v;
        }
        if let Ok(v) = std::env::var("LEAFLET_STORE_DIR") {
            self.index.store_dir = v;
        }
        if let Ok(v) = std::env::var("LEAFLET_CHUNK_SIZE")
            && let Ok(size) = v.parse::<usize>()
        {
            self.index.chunk_size = size;
        }
        if let Ok(v) = std::env::var("LEAFLET_CHUNK_OVERLAP")
            && let Ok(overlap) = v.parse::<usize>()
        {
            self.index.chunk_overlap = overlap;
        }
        if let Ok(v) = std::env::var("LEAFLET_TOP_K")
            && let Ok(k) = v.parse::<usize>()
        {
            self.retrieval.top_k = k;
        }
        if let Ok(v) = std::env::var("LEAFLET_SCORE_THRESHOLD")
            && let Ok(threshold) = v.parse::<f32>()
        {
            self.retrieval.score_threshold = threshold.clamp(0.0, 1.0);
        }
        if let Ok(v) = std::env::var("LEAFLET_REWRITE_ENABLED")
            && let Ok(enabled) = v.parse::<bool>()
        {
            self.rewrite.enabled = enabled;
        }
    }
}
