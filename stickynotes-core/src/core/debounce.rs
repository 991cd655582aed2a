//! Per-note autosave timers.
//!
//! Each edit resets the note's deadline; a note becomes due once `delay` has
//! passed without further edits. The debouncer owns no thread or runtime:
//! the host polls [`Debouncer::take_due`] from its own timer and can ask for
//! [`Debouncer::next_deadline`] to know when to wake up.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadlines: HashMap<String, Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadlines: HashMap::new(),
        }
    }

    /// Starts or restarts the timer for `id`.
    pub fn schedule(&mut self, id: &str, now: Instant) {
        self.deadlines.insert(id.to_string(), now + self.delay);
    }

    /// Forgets any pending timer for `id`, returning whether one was armed.
    pub fn cancel(&mut self, id: &str) -> bool {
        self.deadlines.remove(id).is_some()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.deadlines.contains_key(id)
    }

    /// Earliest armed deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Removes and returns every id whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<String> {
        let mut due: Vec<(Instant, String)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, id.clone()))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.deadlines.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }
}
