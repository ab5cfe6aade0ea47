//! Brochure loading and chunking.

pub mod error;
pub mod loader;
pub mod splitter;
pub mod types;

pub use error::DocumentError;
pub use loader::TextLoader;
pub use splitter::{SplitterConfig, TextSplitter};
pub use types::{Chunk, Document};

#[cfg(feature = "pdf")]
pub use loader::PdfLoader;

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Extensions the scanner picks up from the brochures directory.
pub const BROCHURE_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

pub trait DocumentLoader: Send + Sync {
    fn load(
        &self,
        path: &std::path::Path,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Document, DocumentError>> + Send + '_>,
    >;

    fn supported_extensions(&self) -> &[&str];
}

/// List brochure files (`.pdf` and `.txt`) in `dir`, sorted by file name.
///
/// Other extensions and subdirectories are ignored.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn scan_brochures(dir: &std::path::Path) -> Result<Vec<std::path::PathBuf>, DocumentError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| {
                let lower = e.to_lowercase();
                BROCHURE_EXTENSIONS.contains(&lower.as_str())
            });
        if ext_matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
