//! Flat vector store persisted as a pair of JSON files.
//!
//! `metadata.json` holds the chunk records (filename, window index, text)
//! and `embeddings.json` the vectors, row-aligned with the records. Writes
//! go to a temp file first and are renamed into place so a crash mid-save
//! never leaves a half-written store.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

pub const METADATA_FILE: &str = "metadata.json";
pub const EMBEDDINGS_FILE: &str = "embeddings.json";

/// One embedded chunk as persisted in `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub filename: String,
    pub chunk_index: usize,
    pub text: String,
}

/// In-memory view of the index: chunk records plus their vectors.
#[derive(Debug, Default, Clone)]
pub struct ChunkStore {
    records: Vec<ChunkRecord>,
    embeddings: Vec<Vec<f32>>,
}

impl ChunkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record with its vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector's length differs from the vectors
    /// already stored.
    pub fn push(&mut self, record: ChunkRecord, embedding: Vec<f32>) -> Result<()> {
        if let Some(first) = self.embeddings.first()
            && first.len() != embedding.len()
        {
            return Err(IndexError::DimensionMismatch {
                expected: first.len(),
                got: embedding.len(),
            });
        }
        self.records.push(record);
        self.embeddings.push(embedding);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    #[must_use]
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Vector dimension of the store, if any vectors are present.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.embeddings.first().map(Vec::len)
    }

    /// Number of distinct brochure files represented in the store.
    #[must_use]
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self.records.iter().map(|r| r.filename.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }

    /// Persist the store under `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let metadata = serde_json::to_vec_pretty(&self.records)?;
        let embeddings = serde_json::to_vec(&self.embeddings)?;
        write_atomic(&dir.join(METADATA_FILE), &metadata)?;
        write_atomic(&dir.join(EMBEDDINGS_FILE), &embeddings)?;
        Ok(())
    }

    /// Load a previously saved store from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::StoreNotFound`] if either file is missing,
    /// [`IndexError::CorruptStore`] if record and vector counts disagree or
    /// vector dimensions are inconsistent.
    pub fn load(dir: &Path) -> Result<Self> {
        let metadata_path = dir.join(METADATA_FILE);
        let embeddings_path = dir.join(EMBEDDINGS_FILE);
        if !metadata_path.is_file() || !embeddings_path.is_file() {
            return Err(IndexError::StoreNotFound(dir.to_path_buf()));
        }

        let records: Vec<ChunkRecord> =
            serde_json::from_str(&std::fs::read_to_string(&metadata_path)?)?;
        let embeddings: Vec<Vec<f32>> =
            serde_json::from_str(&std::fs::read_to_string(&embeddings_path)?)?;

        if records.len() != embeddings.len() {
            return Err(IndexError::CorruptStore(format!(
                "{} records but {} embeddings",
                records.len(),
                embeddings.len()
            )));
        }
        if let Some(first) = embeddings.first()
            && embeddings.iter().any(|v| v.len() != first.len())
        {
            return Err(IndexError::CorruptStore(
                "inconsistent embedding dimensions".to_owned(),
            ));
        }

        Ok(Self {
            records,
            embeddings,
        })
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
