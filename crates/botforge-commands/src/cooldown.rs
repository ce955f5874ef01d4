//! Per-(command, user) cooldown accounting.
//!
//! The tracker stores expiry instants lazily: state for a pair exists only
//! after a throttled command has actually been attempted by that user.
//! Entries are never evicted, so memory grows with the number of distinct
//! (command, user) pairs ever checked — acceptable for a process-lifetime
//! store, bounded eviction belongs to a calling layer if needed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Tracks cooldown windows per command and user.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    /// command name → (user id → window expiry).
    windows: HashMap<String, HashMap<String, Instant>>,
}

impl CooldownTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation attempt, returning whether it was throttled.
    ///
    /// This is a check-AND-SET, not a query: a call that observes an open
    /// window arms the next one (`now + cooldown`) as a side effect and
    /// returns `false`.  Call it at most once per actual invocation
    /// attempt — a second call at the same instant consumes nothing but
    /// reports `true`.
    ///
    /// A call that observes a still-cooling window returns `true` and does
    /// NOT extend or refresh the expiry.  A zero `cooldown` always returns
    /// `false` and creates no state.
    pub fn try_use(&mut self, command: &str, user: &str, cooldown: Duration) -> bool {
        if cooldown.is_zero() {
            return false;
        }

        let now = Instant::now();
        let users = self.windows.entry(command.to_owned()).or_default();

        if let Some(expiry) = users.get(user)
            && now < *expiry
        {
            return true;
        }

        users.insert(user.to_owned(), now + cooldown);
        false
    }

    /// Remaining cooldown for a pair.  Pure read: never mutates state.
    ///
    /// Returns zero when no window exists or the window has elapsed.
    pub fn remaining(&self, command: &str, user: &str) -> Duration {
        self.windows
            .get(command)
            .and_then(|users| users.get(user))
            .map(|expiry| expiry.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
