//! Channel implementations for the leaflet chatbot.
//!
//! Only a terminal channel for now; the [`Channel`] trait in `leaflet-core`
//! is the seam for anything else.
//!
//! [`Channel`]: leaflet_core::Channel

mod cli;

pub use cli::CliChannel;
