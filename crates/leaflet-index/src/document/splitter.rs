use super::types::{Chunk, Document};

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 200,
        }
    }
}

/// Splits brochure text into fixed-size character windows.
///
/// Windows are `chunk_size` characters long and advance by
/// `chunk_size - chunk_overlap`, so consecutive windows share
/// `chunk_overlap` characters. Each window is trimmed; a window that trims
/// down to nothing still occupies its index so downstream consumers can skip
/// it without renumbering the rest.
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    #[must_use]
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn split(&self, document: &Document) -> Vec<Chunk> {
        let text = &document.content;
        if text.is_empty() {
            return Vec::new();
        }

        split_chars(text, self.config.chunk_size, self.config.chunk_overlap)
            .into_iter()
            .enumerate()
            .map(|(i, window)| Chunk {
                text: window,
                filename: document.filename.clone(),
                chunk_index: i,
            })
            .collect()
    }
}

fn split_chars(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let mut windows = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let window: String = chars[start..end].iter().collect();
        windows.push(window.trim().to_owned());
        start += step;
    }

    windows
}
