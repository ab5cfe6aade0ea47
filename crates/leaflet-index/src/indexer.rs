//! Indexing orchestrator: scan -> load -> split -> embed -> store.

use std::path::Path;
use std::sync::Arc;

use leaflet_llm::LlmProvider;

use crate::document::{
    DocumentLoader, SplitterConfig, TextLoader, TextSplitter, scan_brochures,
};
use crate::error::Result;
use crate::store::{ChunkRecord, ChunkStore};

#[cfg(feature = "pdf")]
use crate::document::PdfLoader;

/// Summary of an indexing run.
///
/// One unreadable brochure must not sink the rest, so per-file failures are
/// collected into `errors` and the run continues.
#[derive(Debug, Default, Clone)]
pub struct IndexReport {
    pub files_scanned: usize,
    pub files_indexed: usize,
    pub chunks_embedded: usize,
    pub chunks_skipped: usize,
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

/// Builds a [`ChunkStore`] from every brochure in a directory.
pub struct BrochureIndexer<P: LlmProvider> {
    provider: Arc<P>,
    splitter: TextSplitter,
    max_file_size: u64,
}

impl<P: LlmProvider> BrochureIndexer<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, splitter_config: SplitterConfig, max_file_size: u64) -> Self {
        Self {
            provider,
            splitter: TextSplitter::new(splitter_config),
            max_file_size,
        }
    }

    /// Index every `.pdf` and `.txt` brochure under `dir`.
    ///
    /// Chunks are embedded one at a time; windows that trimmed down to
    /// nothing are counted as skipped and keep their index gap in the store.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory scan itself fails; per-file
    /// problems end up in the report instead.
    pub async fn index_dir(&self, dir: &Path) -> Result<(ChunkStore, IndexReport)> {
        let start = std::time::Instant::now();
        let mut report = IndexReport::default();
        let mut store = ChunkStore::new();

        let files = scan_brochures(dir)?;
        let total = files.len();
        tracing::info!(total, dir = %dir.display(), "indexing started");

        for (i, path) in files.iter().enumerate() {
            report.files_scanned += 1;
            let name = crate::document::loader::base_name(path);

            match self.index_file(path, &mut store).await {
                Ok((embedded, skipped)) => {
                    if embedded > 0 {
                        report.files_indexed += 1;
                    }
                    report.chunks_embedded += embedded;
                    report.chunks_skipped += skipped;
                    tracing::info!(
                        file = %name,
                        progress = format_args!("{}/{total}", i + 1),
                        embedded,
                        skipped,
                    );
                }
                Err(e) => {
                    report.errors.push(format!("{name}: {e:#}"));
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
        Ok((store, report))
    }

    async fn index_file(&self, path: &Path, store: &mut ChunkStore) -> Result<(usize, usize)> {
        let document = self.loader_for(path)?.load(path).await?;
        let chunks = self.splitter.split(&document);

        let mut embedded = 0usize;
        let mut skipped = 0usize;

        for chunk in chunks {
            if chunk.text.is_empty() {
                skipped += 1;
                continue;
            }

            let vector = self.provider.embed(&chunk.text).await?;
            store.push(
                ChunkRecord {
                    filename: chunk.filename,
                    chunk_index: chunk.chunk_index,
                    text: chunk.text,
                },
                vector,
            )?;
            embedded += 1;
        }

        Ok((embedded, skipped))
    }

    fn loader_for(&self, path: &Path) -> Result<Box<dyn DocumentLoader>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(Box::new(TextLoader::new(self.max_file_size))),
            #[cfg(feature = "pdf")]
            "pdf" => Ok(Box::new(PdfLoader::new(self.max_file_size))),
            #[cfg(not(feature = "pdf"))]
            "pdf" => Err(crate::document::DocumentError::UnsupportedFormat(
                "pdf (rebuild with the `pdf` feature)".to_owned(),
            )
            .into()),
            other => Err(crate::document::DocumentError::UnsupportedFormat(other.to_owned()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DEFAULT_MAX_FILE_SIZE;
    use leaflet_llm::MockProvider;

    fn indexer(provider: MockProvider) -> BrochureIndexer<MockProvider> {
        BrochureIndexer::new(
            Arc::new(provider),
            SplitterConfig::default(),
            DEFAULT_MAX_FILE_SIZE,
        )
    }

    #[tokio::test]
    async fn indexes_text_brochures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("water.txt"), "Drink two liters of water daily.").unwrap();
        std::fs::write(dir.path().join("sleep.txt"), "Adults need seven hours of sleep.").unwrap();

        let (store, report) = indexer(MockProvider::new())
            .index_dir(dir.path())
            .await
            .unwrap();

        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_indexed, 2);
        assert_eq!(report.chunks_embedded, 2);
        assert_eq!(report.chunks_skipped, 0);
        assert!(report.errors.is_empty());
        assert_eq!(store.len(), 2);
        assert_eq!(store.file_count(), 2);
    }

    #[tokio::test]
    async fn records_carry_filename_and_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("water.txt"), "Drink water.").unwrap();

        let (store, _) = indexer(MockProvider::new())
            .index_dir(dir.path())
            .await
            .unwrap();

        assert_eq!(store.records()[0].filename, "water.txt");
        assert_eq!(store.records()[0].chunk_index, 0);
        assert_eq!(store.records()[0].text, "Drink water.");
    }

    #[tokio::test]
    async fn long_document_produces_overlapping_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let text = "word ".repeat(500);
        std::fs::write(dir.path().join("long.txt"), &text).unwrap();

        let provider = MockProvider::new();
        let idx = BrochureIndexer::new(
            Arc::new(provider),
            SplitterConfig {
                chunk_size: 800,
                chunk_overlap: 200,
            },
            DEFAULT_MAX_FILE_SIZE,
        );
        let (store, report) = idx.index_dir(dir.path()).await.unwrap();

        assert!(store.len() > 1);
        assert_eq!(report.chunks_embedded, store.len());
        // indices are per-document window positions
        let indices: Vec<_> = store.records().iter().map(|r| r.chunk_index).collect();
        assert_eq!(indices, (0..store.len()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn whitespace_only_file_counts_skipped_chunks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blank.txt"), "   \n\n   ").unwrap();

        let (store, report) = indexer(MockProvider::new())
            .index_dir(dir.path())
            .await
            .unwrap();

        assert!(store.is_empty());
        assert_eq!(report.files_indexed, 0);
        assert_eq!(report.chunks_embedded, 0);
        assert_eq!(report.chunks_skipped, 1);
    }

    #[tokio::test]
    async fn empty_file_produces_no_chunks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.txt"), "").unwrap();

        let (store, report) = indexer(MockProvider::new())
            .index_dir(dir.path())
            .await
            .unwrap();

        assert!(store.is_empty());
        assert_eq!(report.chunks_embedded, 0);
        assert_eq!(report.chunks_skipped, 0);
    }

    #[tokio::test]
    async fn oversized_file_recorded_as_error_and_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("big.txt"), "too big for the limit").unwrap();
        std::fs::write(dir.path().join("ok.txt"), "fits").unwrap();

        let idx = BrochureIndexer::new(
            Arc::new(MockProvider::new()),
            SplitterConfig::default(),
            10,
        );
        let (store, report) = idx.index_dir(dir.path()).await.unwrap();

        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_indexed, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("big.txt:"), "{:?}", report.errors);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn embed_failure_recorded_as_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("water.txt"), "Drink water.").unwrap();

        let (store, report) = indexer(MockProvider::new().failing_embeddings())
            .index_dir(dir.path())
            .await
            .unwrap();

        assert!(store.is_empty());
        assert_eq!(report.errors.len(), 1);
    }

    #[tokio::test]
    async fn missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = indexer(MockProvider::new())
            .index_dir(&dir.path().join("nope"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn report_duration_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "content").unwrap();

        let (_, report) = indexer(MockProvider::new())
            .index_dir(dir.path())
            .await
            .unwrap();
        assert!(report.duration_ms < 60_000);
    }
}
