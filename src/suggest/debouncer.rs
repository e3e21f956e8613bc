use std::time::{Duration, Instant};

use super::term::SearchTerm;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Trailing debounce for suggestion lookups.
///
/// Holds at most one pending term. Each `schedule` replaces the pending term
/// and restarts the quiet period, so only the last term of a burst fires.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<PendingLookup>,
}

#[derive(Debug)]
struct PendingLookup {
    term: SearchTerm,
    scheduled_at: Instant,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            pending: None,
        }
    }

    pub fn schedule(&mut self, term: SearchTerm) {
        self.schedule_at(term, Instant::now());
    }

    pub fn schedule_at(&mut self, term: SearchTerm, now: Instant) {
        self.pending = Some(PendingLookup {
            term,
            scheduled_at: now,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Fire the pending term if its quiet period has elapsed
    pub fn poll(&mut self) -> Option<SearchTerm> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<SearchTerm> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.scheduled_at) >= self.delay);

        if ready {
            self.pending.take().map(|p| p.term)
        } else {
            None
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_term(&self) -> Option<&SearchTerm> {
        self.pending.as_ref().map(|p| &p.term)
    }

    /// Remaining quiet time, `None` when nothing is pending
    pub fn time_until_ready_at(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|p| {
            self.delay
                .saturating_sub(now.saturating_duration_since(p.scheduled_at))
        })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
