use leaflet_index::{IndexError, Retriever};
use leaflet_llm::LlmProvider;

use crate::answer::{Answer, AnswerBuilder, SourceRef, format_sources};
use crate::channel::{Channel, ChannelError};
use crate::rewriter::AnswerRewriter;

/// One question/answer exchange.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// Typed error for chat-session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Retrieval against the vector store failed.
    #[error(transparent)]
    Retrieval(#[from] IndexError),

    /// Channel I/O failed.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Interactive question-answering session over a channel.
///
/// Each turn retrieves the closest chunks, assembles an extractive answer,
/// and optionally rewrites it in patient-friendly language. Turns are kept
/// in memory for the lifetime of the session; `/sources` prints the last
/// turn's citations.
pub struct ChatSession<P: LlmProvider, C: Channel> {
    retriever: Retriever<P>,
    builder: AnswerBuilder,
    rewriter: Option<AnswerRewriter<P>>,
    channel: C,
    history: Vec<ChatTurn>,
}

impl<P: LlmProvider, C: Channel> ChatSession<P, C> {
    #[must_use]
    pub fn new(retriever: Retriever<P>, builder: AnswerBuilder, channel: C) -> Self {
        Self {
            retriever,
            builder,
            rewriter: None,
            channel,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rewriter(mut self, rewriter: AnswerRewriter<P>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    #[must_use]
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Answer a single question without touching the channel or history.
    ///
    /// The no-hit answer is a fixed string and is never rewritten; sources
    /// always cite the extractive evidence.
    ///
    /// # Errors
    ///
    /// Returns an error if query embedding or retrieval fails.
    pub async fn answer(&self, question: &str) -> Result<ChatTurn, SessionError> {
        let hits = self.retriever.retrieve(question).await?;
        let Answer {
            question,
            text,
            sources,
        } = self.builder.build(question, &hits);

        let answer = if let Some(rewriter) = &self.rewriter
            && !sources.is_empty()
        {
            rewriter.rewrite(&question, &text).await.unwrap_or(text)
        } else {
            text
        };

        Ok(ChatTurn {
            question,
            answer,
            sources,
        })
    }

    /// Run the chat loop, receiving questions via the channel until EOF.
    ///
    /// A failed turn is reported to the user and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error if channel I/O fails.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        loop {
            let Some(msg) = self.channel.recv().await? else {
                break;
            };

            let trimmed = msg.text.trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed == "/sources" {
                let text = match self.history.last() {
                    Some(turn) => format_sources(&turn.sources),
                    None => "No questions asked yet.".to_owned(),
                };
                self.channel.send(&text).await?;
                continue;
            }

            match self.answer(trimmed).await {
                Ok(turn) => {
                    self.channel.send(&turn.answer).await?;
                    self.history.push(turn);
                }
                Err(e) => {
                    tracing::error!("turn failed: {e:#}");
                    self.channel.send(&format!("Error: {e:#}")).await?;
                }
            }
        }

        Ok(())
    }
}
