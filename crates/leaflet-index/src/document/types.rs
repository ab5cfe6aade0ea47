/// One extracted brochure: the full text plus the base file name it came
/// from. The file name is carried through chunking into the store so answers
/// can cite their sources.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub filename: String,
}

impl Document {
    #[must_use]
    pub fn new(content: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
        }
    }
}

/// A window of brochure text.
///
/// `chunk_index` is the window's position within its document. Windows that
/// trim down to nothing keep their index, so positions stay stable when the
/// embedder later skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub filename: String,
    pub chunk_index: usize,
}
