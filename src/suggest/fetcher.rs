//! Cache-first suggestion lookup
//!
//! Blank input resolves to an empty list without touching the cache. A cached
//! term resolves without calling the provider. Otherwise the provider answer is
//! cached uncapped and returned; the session applies the display cap later.

use std::sync::Arc;

use super::cache::SharedCache;
use super::provider::{ProviderError, SuggestionProvider};
use super::suggestion::Suggestions;
use super::term::SearchTerm;

#[derive(Clone)]
pub struct SuggestionFetcher {
    cache: SharedCache,
    provider: Arc<dyn SuggestionProvider>,
}

impl std::fmt::Debug for SuggestionFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionFetcher")
            .field("provider", &self.provider.name())
            .field("cached_terms", &self.cache.len())
            .finish()
    }
}

impl SuggestionFetcher {
    pub fn new(cache: SharedCache, provider: Arc<dyn SuggestionProvider>) -> Self {
        Self { cache, provider }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Synchronous cache probe
    pub fn cached(&self, term: &SearchTerm) -> Option<Suggestions> {
        self.cache.get(term)
    }

    /// Normalize `raw` and look it up
    pub async fn fetch(&self, raw: &str) -> Result<Suggestions, ProviderError> {
        match SearchTerm::parse(raw) {
            Some(term) => self.fetch_term(&term).await,
            None => Ok(Suggestions::from(Vec::new())),
        }
    }

    pub async fn fetch_term(&self, term: &SearchTerm) -> Result<Suggestions, ProviderError> {
        if let Some(hit) = self.cache.get(term) {
            log::debug!("Cache hit for {} ({} suggestions)", term, hit.len());
            return Ok(hit);
        }

        log::debug!("Cache miss for {}, asking {}", term, self.provider.name());
        let fetched: Suggestions = self.provider.provide(term).await?.into();
        self.cache.put(term.clone(), fetched.clone());
        Ok(fetched)
    }
}
