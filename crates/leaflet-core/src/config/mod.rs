mod env;
mod types;


pub use types::*;

use std::path::Path;

use anyhow::Context;

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject value combinations the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error if `chunk_overlap >= chunk_size`, `top_k` is zero,
    /// or `max_sentences` is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.index.chunk_overlap >= self.index.chunk_size {
            anyhow::bail!(
                "index.chunk_overlap ({}) must be smaller than index.chunk_size ({})",
                self.index.chunk_overlap,
                self.index.chunk_size
            );
        }
        if self.retrieval.top_k == 0 {
            anyhow::bail!("retrieval.top_k must be at least 1");
        }
        if self.answer.max_sentences == 0 {
            anyhow::bail!("answer.max_sentences must be at least 1");
        }
        Ok(())
    }
}
