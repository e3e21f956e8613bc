//! Shared test utilities for streetfind
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use futures::future::{BoxFuture, FutureExt};
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::config::AutocompleteConfig;
    use crate::suggest::{
        ProviderError, SearchTerm, Session, SharedCache, Suggestion, SuggestionFetcher,
        SuggestionProvider,
    };

    /// Helper to create a KeyEvent without modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    /// Helper to create a KeyEvent with specific modifiers
    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    /// How long `settle` keeps pumping a session before giving up
    pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

    /// Provider answering from a script instead of a street list.
    ///
    /// Unknown terms resolve to an empty list. Every call is recorded so tests
    /// can assert how many lookups reached the provider.
    #[derive(Debug, Clone, Default)]
    pub struct ScriptedProvider {
        results: HashMap<String, Vec<String>>,
        failures: HashMap<String, String>,
        delays: HashMap<String, Duration>,
        panics: HashMap<String, String>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_results(mut self, term: &str, streets: &[&str]) -> Self {
            self.results.insert(
                term.to_string(),
                streets.iter().map(|s| s.to_string()).collect(),
            );
            self
        }

        pub fn with_failure(mut self, term: &str, message: &str) -> Self {
            self.failures.insert(term.to_string(), message.to_string());
            self
        }

        /// Panic inside the lookup instead of answering
        pub fn with_panic(mut self, term: &str, message: &str) -> Self {
            self.panics.insert(term.to_string(), message.to_string());
            self
        }

        pub fn with_delay(mut self, term: &str, delay: Duration) -> Self {
            self.delays.insert(term.to_string(), delay);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn shared(self) -> Arc<dyn SuggestionProvider> {
            Arc::new(self)
        }
    }

    impl SuggestionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn provide<'a>(
            &'a self,
            term: &'a SearchTerm,
        ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>> {
            async move {
                let key = term.as_str();
                self.calls.lock().unwrap().push(key.to_string());

                if let Some(delay) = self.delays.get(key) {
                    tokio::time::sleep(*delay).await;
                }

                if let Some(message) = self.panics.get(key) {
                    panic!("{}", message);
                }

                if let Some(message) = self.failures.get(key) {
                    return Err(ProviderError::Network {
                        provider: "scripted".to_string(),
                        message: message.clone(),
                    });
                }

                Ok(self
                    .results
                    .get(key)
                    .map(|streets| streets.iter().map(Suggestion::new).collect())
                    .unwrap_or_default())
            }
            .boxed()
        }
    }

    /// Config with a short debounce so live-clock tests stay fast
    pub fn test_config() -> AutocompleteConfig {
        AutocompleteConfig {
            debounce_ms: 300,
            ..AutocompleteConfig::default()
        }
    }

    pub fn fetcher_with(provider: &ScriptedProvider) -> SuggestionFetcher {
        SuggestionFetcher::new(SharedCache::new(32), provider.clone().shared())
    }

    /// Attached session backed by a scripted provider
    pub fn test_session(provider: &ScriptedProvider) -> Session {
        let mut session = Session::new("street_name", test_config(), fetcher_with(provider));
        session.attach();
        session
    }

    /// Pump `tick_at(now)` on a real clock until no lookup is in flight
    pub fn settle(session: &mut Session, now: Instant) {
        let deadline = Instant::now() + SETTLE_TIMEOUT;
        loop {
            session.tick_at(now);
            if !session.is_fetch_in_flight() || Instant::now() >= deadline {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    pub fn names(session: &Session) -> Vec<String> {
        session
            .state()
            .suggestions()
            .iter()
            .map(|s| s.street_name.clone())
            .collect()
    }

    pub fn after(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }
}
