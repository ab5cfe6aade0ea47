use std::fmt::Write;
use std::path::Path;

use leaflet_index::SearchHit;

const NO_MATCH_ANSWER: &str = "I could not find any relevant information about this in the \
     loaded documents. Please check that the PDFs contain information about this topic.";

const ANSWER_HEADER: &str = "Here is what the documents say about your question:";

const ANSWER_DISCLAIMER: &str = "This summary is built directly from the brochures. It is \
     general information and does **not** replace the opinion of a healthcare professional.";

/// Citation attached to an answer: where a snippet came from and how well it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRef {
    pub filename: String,
    pub score: f32,
    pub chunk_index: usize,
    pub snippet: String,
}

/// An assembled answer with its citations.
#[derive(Debug, Clone)]
pub struct Answer {
    pub question: String,
    pub text: String,
    pub sources: Vec<SourceRef>,
}

/// Composes extractive answers from retrieved chunks.
///
/// Each hit is truncated to `max_chunk_chars`, reduced to its first
/// `max_sentences` sentences, and rendered as a bullet citing the source
/// file. No text is generated; everything in the answer body is copied
/// from the brochures.
#[derive(Debug, Clone)]
pub struct AnswerBuilder {
    max_chunk_chars: usize,
    max_sentences: usize,
}

impl Default for AnswerBuilder {
    fn default() -> Self {
        Self {
            max_chunk_chars: 600,
            max_sentences: 3,
        }
    }
}

impl AnswerBuilder {
    #[must_use]
    pub fn new(max_chunk_chars: usize, max_sentences: usize) -> Self {
        Self {
            max_chunk_chars,
            max_sentences,
        }
    }

    /// Builds an extractive answer from retrieval hits, best hit first.
    ///
    /// With no hits the answer text states that nothing relevant was found
    /// and the source list is empty.
    #[must_use]
    pub fn build(&self, question: &str, hits: &[SearchHit]) -> Answer {
        if hits.is_empty() {
            return Answer {
                question: question.to_owned(),
                text: NO_MATCH_ANSWER.to_owned(),
                sources: Vec::new(),
            };
        }

        let mut bullets = Vec::with_capacity(hits.len());
        let mut sources = Vec::with_capacity(hits.len());

        for hit in hits {
            let truncated = truncate_chars(&hit.text, self.max_chunk_chars);
            let snippet = keep_first_sentences(truncated, self.max_sentences);
            let filename = base_name(&hit.filename);

            bullets.push(format!("- From **{filename}**: {snippet}"));
            sources.push(SourceRef {
                filename,
                score: hit.score,
                chunk_index: hit.chunk_index,
                snippet,
            });
        }

        let mut lines = vec![ANSWER_HEADER.to_owned(), String::new()];
        lines.extend(bullets);
        lines.push(String::new());
        lines.push(ANSWER_DISCLAIMER.to_owned());

        Answer {
            question: question.to_owned(),
            text: lines.join("\n"),
            sources,
        }
    }
}

/// Renders a numbered source list for display, one entry per citation.
#[must_use]
pub fn format_sources(sources: &[SourceRef]) -> String {
    if sources.is_empty() {
        return "No sources found.".to_owned();
    }

    let mut out = String::new();
    for (i, source) in sources.iter().enumerate() {
        let _ = writeln!(
            out,
            "Source {n}: {filename}\n  score: {score:.3}  chunk: {chunk}\n  {snippet}",
            n = i + 1,
            filename = source.filename,
            score = source.score,
            chunk = source.chunk_index,
            snippet = source.snippet,
        );
    }
    out.trim_end().to_owned()
}

fn clean_text(text: &str) -> String {
    let mut out = text.replace(['\r', '\n'], " ");
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out.trim().to_owned()
}

fn keep_first_sentences(text: &str, max_sentences: usize) -> String {
    let cleaned = clean_text(text);
    let parts: Vec<&str> = cleaned.split(". ").collect();
    if parts.len() <= max_sentences {
        return cleaned;
    }
    let mut kept = parts[..max_sentences].join(". ").trim().to_owned();
    if !kept.ends_with('.') {
        kept.push('.');
    }
    kept
}

// Truncation counts characters, not bytes, so multibyte text never splits
// mid-codepoint.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn base_name(filename: &str) -> String {
    Path::new(filename).file_name().map_or_else(
        || filename.to_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}
