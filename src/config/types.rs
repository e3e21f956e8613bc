// Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

use crate::suggest::DEFAULT_CACHE_CAPACITY;
use crate::suggest::debouncer::DEFAULT_DEBOUNCE_MS;

fn default_enabled() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// Display cap applied when a lookup result is shown
fn default_max_suggestions() -> usize {
    15
}

/// Grace period between blur and closing the list
fn default_blur_close_ms() -> u64 {
    150
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

/// Provider-side cap on answers
fn default_max_results() -> usize {
    20
}

fn default_timeout_ms() -> u64 {
    5_000
}

/// Type-ahead behaviour section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AutocompleteConfig {
    /// When false the field is a plain text input
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_blur_close_ms")]
    pub blur_close_ms: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        AutocompleteConfig {
            enabled: default_enabled(),
            debounce_ms: default_debounce_ms(),
            max_suggestions: default_max_suggestions(),
            blur_close_ms: default_blur_close_ms(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Suggestion provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Static,
    Http,
}

/// Suggestion provider section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    /// Street list for the static provider (built-in list when unset)
    #[serde(default)]
    pub streets_file: Option<PathBuf>,
    /// Lookup URL for the HTTP provider (required when kind = "http")
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            kind: ProviderKind::default(),
            streets_file: None,
            endpoint: None,
            max_results: default_max_results(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
