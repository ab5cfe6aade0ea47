//! Core pieces of the leaflet chatbot: configuration, the channel
//! abstraction, extractive answer assembly, the optional LLM rewriter, and
//! the chat session loop that ties them together.

pub mod answer;
pub mod channel;
pub mod config;
pub mod rewriter;
pub mod session;

pub use answer::{Answer, AnswerBuilder, SourceRef, format_sources};
pub use channel::{Channel, ChannelError, ChannelMessage};
pub use config::Config;
pub use rewriter::AnswerRewriter;
pub use session::{ChatSession, ChatTurn, SessionError};
