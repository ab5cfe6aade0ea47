use std::sync::Arc;

use leaflet_llm::{LlmProvider, Message, Role};

const REWRITE_INSTRUCTION: &str = "Rewrite the answer below for a patient using clear, simple \
     and reassuring language. Do not give personalized diagnosis. Do not add new medical facts. \
     Finish with one sentence reminding that this does not replace advice from a healthcare \
     professional.";

/// Rephrases extractive answers in patient-friendly language.
///
/// Rewriting is best-effort: any provider failure or empty response falls
/// back to the extractive text, so a turn never fails because of it.
#[derive(Debug, Clone)]
pub struct AnswerRewriter<P: LlmProvider> {
    provider: Arc<P>,
}

impl<P: LlmProvider> AnswerRewriter<P> {
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Returns the rewritten answer, or `None` when the caller should keep
    /// the extractive text.
    pub async fn rewrite(&self, question: &str, extractive_answer: &str) -> Option<String> {
        if extractive_answer.trim().is_empty() {
            return None;
        }

        let messages = [
            Message::new(Role::System, REWRITE_INSTRUCTION),
            Message::new(
                Role::User,
                format!(
                    "Question: {}\n\nAnswer to rewrite:\n{}",
                    question.trim(),
                    extractive_answer.trim()
                ),
            ),
        ];

        let rewritten = match self.provider.chat(&messages).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("answer rewrite failed, keeping extractive answer: {e}");
                return None;
            }
        };

        let rewritten = rewritten.trim();
        if rewritten.is_empty() {
            return None;
        }
        Some(rewritten.to_owned())
    }
}
