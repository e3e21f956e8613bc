//! Remote suggestion endpoint
//!
//! Issues `GET <endpoint>?term=<TERM>&limit=<N>` and expects a JSON array of
//! objects carrying at least `street_name`.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};

use super::{ProviderError, SuggestionProvider};
use crate::suggest::suggestion::Suggestion;
use crate::suggest::term::SearchTerm;

const PROVIDER_NAME: &str = "http";

#[derive(Debug, Clone)]
pub struct HttpStreetProvider {
    client: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl HttpStreetProvider {
    pub fn new(
        endpoint: String,
        max_results: usize,
        timeout_ms: u64,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ProviderError::NotConfigured {
                provider: PROVIDER_NAME.to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint,
            max_results,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, term: &SearchTerm) -> Result<Vec<Suggestion>, ProviderError> {
        log::debug!("GET {} term={}", self.endpoint, term);

        let limit = self.max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("term", term.as_str()), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: PROVIDER_NAME.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER_NAME.to_string(),
                code: status.as_u16(),
                message: if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body
                },
            });
        }

        let mut suggestions: Vec<Suggestion> =
            response.json().await.map_err(|e| ProviderError::Parse {
                provider: PROVIDER_NAME.to_string(),
                message: e.to_string(),
            })?;

        suggestions.truncate(self.max_results);
        Ok(suggestions)
    }
}

impl SuggestionProvider for HttpStreetProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn provide<'a>(
        &'a self,
        term: &'a SearchTerm,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>> {
        self.request(term).boxed()
    }
}
