//! Content search and multi-step form intake behind a junk-removal marketing site.

pub mod config;
pub mod content;
pub mod error;
pub mod intake;
pub mod telemetry;
