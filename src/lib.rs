//! streetfind library - type-ahead street name lookup
//!
//! This library exposes the suggestion engine and the terminal host for
//! embedding and testing.

pub mod app;
pub mod config;
pub mod error;
pub mod suggest;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::Config;
pub use suggest::{Session, SharedCache, SuggestionFetcher};
