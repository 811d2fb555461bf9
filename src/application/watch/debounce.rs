//! Per-path quiet-period debouncer
//!
//! Every event for a path restarts that path's timer. A path settles once no
//! event has arrived for it within the quiet period. Time is always passed
//! in, so the state machine can be driven deterministically.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Default quiet period in milliseconds
pub const DEBOUNCE_MS: u64 = 250;

#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    /// Pending paths with their arrival sequence number and last event time
    pending: HashMap<PathBuf, (u64, Instant)>,
    next_seq: u64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record an event for `path` at `at`, restarting its timer
    pub fn record(&mut self, path: PathBuf, at: Instant) {
        match self.pending.entry(path) {
            Entry::Occupied(mut slot) => slot.get_mut().1 = at,
            Entry::Vacant(slot) => {
                slot.insert((self.next_seq, at));
                self.next_seq += 1;
            }
        }
    }

    /// Remove and return every path whose quiet period has elapsed by `now`,
    /// in first-arrival order
    pub fn settled(&mut self, now: Instant) -> Vec<PathBuf> {
        let quiet = self.quiet;
        let mut settled = Vec::new();
        self.pending.retain(|path, (seq, last)| {
            if now.saturating_duration_since(*last) >= quiet {
                settled.push((*seq, path.clone()));
                false
            } else {
                true
            }
        });
        settled.sort_unstable_by_key(|(seq, _)| *seq);
        settled.into_iter().map(|(_, path)| path).collect()
    }

    /// Earliest instant at which some pending path settles
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|(_, last)| *last + self.quiet).min()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
