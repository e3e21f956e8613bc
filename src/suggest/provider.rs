//! Suggestion providers
//!
//! A provider answers one normalized term with prefix-matching suggestions in
//! its own relevance order. The engine never re-sorts what comes back.

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;

use super::suggestion::Suggestion;
use super::term::SearchTerm;
use crate::config::{ProviderConfig, ProviderKind};

mod http;
mod static_list;

pub use http::HttpStreetProvider;
pub use static_list::{DEFAULT_STREETS, StaticStreetProvider};

/// Errors a provider can reject with
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    /// Provider cannot be built from the given configuration
    #[error("[{provider}] not configured: {message}")]
    NotConfigured { provider: String, message: String },

    /// Transport failure (connect, timeout, reset)
    #[error("[{provider}] network error: {message}")]
    Network { provider: String, message: String },

    /// Backend answered with a non-success status
    #[error("[{provider}] API error ({code}): {message}")]
    Api {
        provider: String,
        code: u16,
        message: String,
    },

    /// Backend answered with a body we could not decode
    #[error("[{provider}] parse error: {message}")]
    Parse { provider: String, message: String },

    /// Street list could not be loaded
    #[error("[{provider}] failed to load street list: {message}")]
    Source { provider: String, message: String },
}

/// Source of suggestions for a normalized term.
///
/// Implementations must be cheap to share across tasks; the fetch worker holds
/// one behind an `Arc` and may run several lookups at once.
pub trait SuggestionProvider: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    fn provide<'a>(
        &'a self,
        term: &'a SearchTerm,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>>;
}

/// Build the provider selected in configuration
pub fn from_config(config: &ProviderConfig) -> Result<Arc<dyn SuggestionProvider>, ProviderError> {
    match config.kind {
        ProviderKind::Static => {
            let provider = match &config.streets_file {
                Some(path) => StaticStreetProvider::from_file(path, config.max_results)?,
                None => StaticStreetProvider::builtin(config.max_results),
            };
            log::debug!("Using static provider with {} streets", provider.len());
            Ok(Arc::new(provider))
        }
        ProviderKind::Http => {
            let endpoint = config
                .endpoint
                .as_ref()
                .filter(|e| !e.trim().is_empty())
                .ok_or_else(|| ProviderError::NotConfigured {
                    provider: "http".to_string(),
                    message: "Missing endpoint. Add 'endpoint' in [provider] section (e.g., 'https://example.org/streets/suggest').".to_string(),
                })?;
            let provider =
                HttpStreetProvider::new(endpoint.clone(), config.max_results, config.timeout_ms)?;
            log::debug!("Using HTTP provider at {}", endpoint);
            Ok(Arc::new(provider))
        }
    }
}
