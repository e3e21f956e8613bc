//! Incremental suggestion engine
//!
//! Keystrokes flow through a [`Session`]: the debouncer coalesces them, the
//! fetcher answers from the [`SharedCache`] or a [`SuggestionProvider`], and the
//! fetch worker hands results back to the session tagged with the generation
//! that requested them.

pub mod cache;
pub mod debouncer;
pub mod fetcher;
pub mod provider;
pub mod session;
pub mod suggestion;
pub mod term;
pub mod worker;

pub use cache::{DEFAULT_CACHE_CAPACITY, QueryCache, SharedCache};
pub use debouncer::Debouncer;
pub use fetcher::SuggestionFetcher;
pub use provider::{ProviderError, SuggestionProvider};
pub use session::{Key, Phase, Session, SessionState};
pub use suggestion::{Suggestion, Suggestions};
pub use term::SearchTerm;
