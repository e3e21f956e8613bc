//! Bounded query cache
//!
//! Maps a normalized [`SearchTerm`] to the suggestion list a provider returned
//! for it. Eviction is by insertion order: when a new key arrives at capacity
//! the oldest-inserted key goes first, no matter how recently it was read.
//! Re-putting a key replaces its value but keeps its original position.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use super::suggestion::Suggestions;
use super::term::SearchTerm;

pub const DEFAULT_CACHE_CAPACITY: usize = 100;

#[derive(Debug)]
pub struct QueryCache {
    capacity: usize,
    entries: HashMap<SearchTerm, Suggestions>,
    /// Keys in insertion order, front is the next eviction candidate
    order: VecDeque<SearchTerm>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        // Capacity comes from config; only the default size is reserved up front
        let reserved = capacity.min(DEFAULT_CACHE_CAPACITY);
        Self {
            capacity,
            entries: HashMap::with_capacity(reserved),
            order: VecDeque::with_capacity(reserved),
        }
    }

    pub fn get(&self, term: &SearchTerm) -> Option<Suggestions> {
        self.entries.get(term).cloned()
    }

    pub fn put(&mut self, term: SearchTerm, suggestions: Suggestions) {
        if self.capacity == 0 {
            return;
        }

        if let Some(existing) = self.entries.get_mut(&term) {
            *existing = suggestions;
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    log::debug!("Evicting cached suggestions for {}", oldest);
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.order.push_back(term.clone());
        self.entries.insert(term, suggestions);
    }

    pub fn contains(&self, term: &SearchTerm) -> bool {
        self.entries.contains_key(term)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Cloneable handle to one cache shared by every session and fetch worker.
///
/// Each operation takes the lock for a single key, so writers are
/// last-writer-wins and no operation spans two calls.
#[derive(Debug, Clone, Default)]
pub struct SharedCache {
    inner: Arc<Mutex<QueryCache>>,
}

impl SharedCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueryCache::new(capacity))),
        }
    }

    pub fn get(&self, term: &SearchTerm) -> Option<Suggestions> {
        self.lock().get(term)
    }

    pub fn put(&self, term: SearchTerm, suggestions: Suggestions) {
        self.lock().put(term, suggestions);
    }

    pub fn contains(&self, term: &SearchTerm) -> bool {
        self.lock().contains(term)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    // A panic while holding the lock cannot leave a half-applied entry behind,
    // so the poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, QueryCache> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
