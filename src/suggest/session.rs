//! Interaction state machine for one type-ahead field
//!
//! A session turns input, keyboard, focus and selection events into
//! [`SessionState`] changes. It owns the debouncer and a fetch worker, and it
//! is driven by a host calling [`Session::tick`] from its event loop: ticks
//! fire due debounce timers and blur-closes and apply finished lookups.
//!
//! Every lookup is tagged with a generation. Only the response whose
//! generation is still in flight is applied, so a slow early answer can never
//! overwrite a later one. `detach` invalidates the generation and cancels the
//! liveness token shared with the worker, after which nothing changes state.

use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use super::debouncer::Debouncer;
use super::fetcher::SuggestionFetcher;
use super::suggestion::{Suggestion, Suggestions};
use super::term::SearchTerm;
use super::worker::{FetchRequest, FetchResponse, spawn_worker};
use crate::config::AutocompleteConfig;

pub mod keys;
pub mod state;

pub use keys::{Key, KeyOutcome};
pub use state::{Phase, SessionState};

/// Value-changed notification: `(field_name, value)`
pub type ValueChanged = Box<dyn FnMut(&str, &str) + Send>;

pub struct Session {
    field_name: String,
    config: AutocompleteConfig,
    state: SessionState,
    debouncer: Debouncer,
    fetcher: SuggestionFetcher,
    /// When a blur-triggered close is due
    blur_close_at: Option<Instant>,

    request_tx: Option<UnboundedSender<FetchRequest>>,
    response_rx: Option<Receiver<FetchResponse>>,
    /// Next generation to hand out (starts at 1)
    next_generation: u64,
    /// Generation of the lookup whose answer is still wanted
    in_flight: Option<u64>,
    liveness: CancellationToken,
    attached: bool,

    on_change: Option<ValueChanged>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("field_name", &self.field_name)
            .field("state", &self.state)
            .field("attached", &self.attached)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl Session {
    pub fn new(
        field_name: impl Into<String>,
        config: AutocompleteConfig,
        fetcher: SuggestionFetcher,
    ) -> Self {
        let debouncer = Debouncer::new(config.debounce_ms);
        Self {
            field_name: field_name.into(),
            config,
            state: SessionState::default(),
            debouncer,
            fetcher,
            blur_close_at: None,
            request_tx: None,
            response_rx: None,
            next_generation: 1,
            in_flight: None,
            liveness: CancellationToken::new(),
            attached: false,
            on_change: None,
        }
    }

    pub fn with_on_change(mut self, callback: ValueChanged) -> Self {
        self.on_change = Some(callback);
        self
    }

    pub fn set_on_change(&mut self, callback: ValueChanged) {
        self.on_change = Some(callback);
    }

    /// Start a fresh session: default state, new liveness token, and a fetch
    /// worker when autocomplete is enabled. No-op if already attached.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }

        self.state = SessionState::default();
        self.debouncer = Debouncer::new(self.config.debounce_ms);
        self.blur_close_at = None;
        self.in_flight = None;
        self.liveness = CancellationToken::new();

        if self.config.enabled {
            let (request_tx, request_rx) = unbounded_channel();
            let (response_tx, response_rx) = channel();
            spawn_worker(self.fetcher.clone(), request_rx, response_tx);
            self.request_tx = Some(request_tx);
            self.response_rx = Some(response_rx);
        }

        self.attached = true;
        log::debug!("Session '{}' attached", self.field_name);
    }

    /// Tear down: pending timers are dropped and in-flight lookups are ignored
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }

        self.debouncer.cancel();
        self.blur_close_at = None;
        self.in_flight = None;
        self.liveness.cancel();
        // Dropping the sender stops the worker once its tasks finish
        self.request_tx = None;
        self.response_rx = None;
        self.attached = false;
        log::debug!("Session '{}' detached", self.field_name);
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn fetcher(&self) -> &SuggestionFetcher {
        &self.fetcher
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_pending_lookup(&self) -> bool {
        self.debouncer.has_pending()
    }

    pub fn on_input_change(&mut self, raw: &str) {
        self.on_input_change_at(raw, Instant::now());
    }

    pub fn on_input_change_at(&mut self, raw: &str, now: Instant) {
        if !self.attached {
            log::debug!("Ignoring input on detached session '{}'", self.field_name);
            return;
        }

        self.state.set_input(raw);
        self.notify_value_changed();

        if !self.config.enabled {
            return;
        }

        // Whatever was in flight answers an older text now
        self.in_flight = None;

        match SearchTerm::parse(raw) {
            Some(term) => {
                self.debouncer.schedule_at(term, now);
                self.state.mark_pending();
            }
            None => {
                self.debouncer.cancel();
                self.state.go_idle();
            }
        }
    }

    /// Route a navigation key through the transition table.
    /// Returns whether the state changed.
    pub fn on_key(&mut self, key: Key) -> bool {
        if !self.attached || !self.config.enabled {
            return false;
        }

        match keys::apply(key, &mut self.state) {
            KeyOutcome::Ignored => false,
            KeyOutcome::Highlighted(_) | KeyOutcome::Dismissed => true,
            KeyOutcome::Select(index) => self.select_index(index),
        }
    }

    /// Accept the suggestion at `index` of the current list
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.state.suggestions().get(index).cloned() {
            Some(suggestion) => {
                self.select_suggestion(&suggestion);
                true
            }
            None => false,
        }
    }

    pub fn select_suggestion(&mut self, suggestion: &Suggestion) {
        if !self.attached {
            return;
        }

        log::debug!(
            "Session '{}' selected {}",
            self.field_name,
            suggestion.street_name
        );
        self.debouncer.cancel();
        self.in_flight = None;
        self.blur_close_at = None;
        self.state.apply_selection(&suggestion.street_name);
        self.notify_value_changed();
    }

    /// Reopen a list from an earlier lookup without fetching again
    pub fn on_focus(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.blur_close_at = None;
        self.state.reopen()
    }

    pub fn on_blur(&mut self) {
        self.on_blur_at(Instant::now());
    }

    /// Close after a short delay so a pointer selection that blurred the
    /// field first still lands on an open list
    pub fn on_blur_at(&mut self, now: Instant) {
        if !self.attached {
            return;
        }
        self.blur_close_at = Some(now + Duration::from_millis(self.config.blur_close_ms));
    }

    /// Back to an empty, idle field
    pub fn clear(&mut self) {
        if !self.attached {
            return;
        }

        self.debouncer.cancel();
        self.in_flight = None;
        self.blur_close_at = None;
        self.state.reset();
        self.notify_value_changed();
    }

    /// Adopt the parent's value when it diverges from ours.
    /// No notification goes back and no lookup is scheduled.
    pub fn sync_external_value(&mut self, value: &str) -> bool {
        if !self.attached || self.state.input_value() == value {
            return false;
        }
        log::debug!("Session '{}' synced external value", self.field_name);
        self.state.set_input(value);
        true
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Fire due timers and apply finished lookups. Returns whether the state
    /// changed, so hosts can skip redraws.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if !self.attached {
            return false;
        }

        let mut changed = false;

        if self.blur_close_at.is_some_and(|due| now >= due) {
            self.blur_close_at = None;
            self.state.close();
            changed = true;
        }

        if let Some(term) = self.debouncer.poll_at(now) {
            self.dispatch(term);
            changed = true;
        }

        if self.drain_responses() {
            changed = true;
        }

        changed
    }

    /// Time until the next timer is due, for sizing a host's poll timeout
    pub fn next_deadline_at(&self, now: Instant) -> Option<Duration> {
        let blur = self
            .blur_close_at
            .map(|due| due.saturating_duration_since(now));
        let debounce = self.debouncer.time_until_ready_at(now);

        match (blur, debounce) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn allocate_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        if self.next_generation == 0 {
            self.next_generation = 1;
        }
        generation
    }

    fn dispatch(&mut self, term: SearchTerm) {
        let generation = self.allocate_generation();

        if let Some(hit) = self.fetcher.cached(&term) {
            log::debug!("Lookup {} for {} served from cache", generation, term);
            self.in_flight = None;
            self.publish(&hit);
            return;
        }

        let Some(tx) = self.request_tx.as_ref() else {
            log::error!("No request channel available");
            self.state
                .show_error("Unable to load suggestions: suggestion worker disconnected".into());
            return;
        };

        log::debug!("Sending lookup {} for {}", generation, term);
        let request = FetchRequest {
            term,
            generation,
            liveness: self.liveness.clone(),
        };

        if tx.send(request).is_err() {
            log::error!("Fetch worker disconnected - send failed");
            self.request_tx = None;
            self.response_rx = None;
            self.in_flight = None;
            self.state
                .show_error("Unable to load suggestions: suggestion worker disconnected".into());
            return;
        }

        self.in_flight = Some(generation);
        self.state.start_loading();
    }

    fn drain_responses(&mut self) -> bool {
        let Some(rx) = self.response_rx.take() else {
            return false;
        };

        let mut changed = false;
        loop {
            match rx.try_recv() {
                Ok(response) => {
                    if self.process_response(response) {
                        changed = true;
                    }
                }
                Err(TryRecvError::Empty) => {
                    self.response_rx = Some(rx);
                    break;
                }
                Err(TryRecvError::Disconnected) => {
                    log::error!("Fetch worker disconnected in tick");
                    self.request_tx = None;
                    if self.in_flight.take().is_some() {
                        self.state.show_error(
                            "Unable to load suggestions: suggestion worker disconnected".into(),
                        );
                        changed = true;
                    }
                    break;
                }
            }
        }
        changed
    }

    /// Apply one worker response if it belongs to the current lookup.
    /// Returns false for stale responses, which change nothing.
    pub(crate) fn process_response(&mut self, response: FetchResponse) -> bool {
        if !self.attached {
            return false;
        }

        let generation = response.generation();
        if Some(generation) != self.in_flight {
            log::debug!(
                "Ignoring stale response {} for {} (current: {:?})",
                generation,
                response.term(),
                self.in_flight
            );
            return false;
        }

        self.in_flight = None;
        match response {
            FetchResponse::Loaded { suggestions, .. } => self.publish(&suggestions),
            FetchResponse::Failed { message, .. } => {
                self.state
                    .show_error(format!("Unable to load suggestions: {}", message));
            }
        }
        true
    }

    /// Show a lookup result, capped to the configured display size
    fn publish(&mut self, suggestions: &Suggestions) {
        let visible = suggestions
            .iter()
            .take(self.config.max_suggestions)
            .cloned()
            .collect();
        self.state.show_results(visible);
    }

    fn notify_value_changed(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.field_name, self.state.input_value());
        }
    }

    #[cfg(test)]
    pub(crate) fn in_flight_generation(&self) -> Option<u64> {
        self.in_flight
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
