//! In-memory street list provider
//!
//! Stand-in for a backend search endpoint: filters a fixed list by
//! case-insensitive prefix and caps the answer.

use std::fs;
use std::path::Path;

use futures::future::{self, BoxFuture, FutureExt};

use super::{ProviderError, SuggestionProvider};
use crate::suggest::suggestion::Suggestion;
use crate::suggest::term::SearchTerm;

pub const DEFAULT_MAX_RESULTS: usize = 20;

pub const DEFAULT_STREETS: &[&str] = &[
    "ADAMS ST",
    "ASH ST",
    "BAKER ST",
    "BEACON ST",
    "BROAD ST",
    "BROADWAY",
    "CEDAR AVE",
    "CENTER ST",
    "CHERRY LN",
    "CHESTNUT ST",
    "CHURCH ST",
    "COLLEGE AVE",
    "ELM ST",
    "FRANKLIN AVE",
    "FRONT ST",
    "GRAND AVE",
    "HIGHLAND AVE",
    "HILL ST",
    "JACKSON ST",
    "JEFFERSON AVE",
    "JEFFERSON BLVD",
    "JEFFERSON ST",
    "KING ST",
    "LAKE ST",
    "LAKESHORE DR",
    "LIBERTY ST",
    "LINCOLN AVE",
    "LOCUST ST",
    "MADISON AVE",
    "MAIN ST",
    "MAPLE AVE",
    "MARKET ST",
    "MILL RD",
    "MONROE ST",
    "OAK ST",
    "PARK AVE",
    "PARK PL",
    "PEARL ST",
    "PINE ST",
    "PLEASANT ST",
    "RIVER RD",
    "SCHOOL ST",
    "SPRING ST",
    "SPRUCE ST",
    "STATE ST",
    "SUMMIT AVE",
    "UNION ST",
    "VINE ST",
    "WALNUT ST",
    "WASHINGTON AVE",
    "WASHINGTON BLVD",
    "WASHINGTON ST",
    "WATER ST",
    "WILLOW ST",
];

#[derive(Debug, Clone)]
pub struct StaticStreetProvider {
    streets: Vec<String>,
    max_results: usize,
}

impl StaticStreetProvider {
    pub fn new<I, S>(streets: I, max_results: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            streets: streets.into_iter().map(Into::into).collect(),
            max_results,
        }
    }

    pub fn builtin(max_results: usize) -> Self {
        Self::new(DEFAULT_STREETS.iter().copied(), max_results)
    }

    /// Load one street per line; blank lines and `#` comments are skipped
    pub fn from_file(path: &Path, max_results: usize) -> Result<Self, ProviderError> {
        let contents = fs::read_to_string(path).map_err(|e| ProviderError::Source {
            provider: "static".to_string(),
            message: format!("{}: {}", path.display(), e),
        })?;

        Ok(Self::new(parse_street_list(&contents), max_results))
    }

    pub fn len(&self) -> usize {
        self.streets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }

    pub fn matches(&self, term: &SearchTerm) -> Vec<Suggestion> {
        self.streets
            .iter()
            .filter(|street| term.is_prefix_of(street))
            .take(self.max_results)
            .map(|street| Suggestion::new(street.as_str()))
            .collect()
    }
}

impl SuggestionProvider for StaticStreetProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn provide<'a>(
        &'a self,
        term: &'a SearchTerm,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>> {
        future::ready(Ok(self.matches(term))).boxed()
    }
}

fn parse_street_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
