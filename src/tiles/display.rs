//! Connection-less tiles that only surface session state

use std::time::Duration;

use crate::tiles::nexus::NexusId;

/// Previews the next colour a spawn chain will emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcer {
    context: NexusId,
}

impl Announcer {
    /// Create an announcer watching the chain of `context`
    pub const fn new(context: NexusId) -> Self {
        Self { context }
    }

    /// Watched context
    pub const fn context(&self) -> NexusId {
        self.context
    }
}

/// Counts a level's time limit down as the session clock advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTile {
    limit: Duration,
    elapsed: Duration,
}

impl TimerTile {
    /// Create a timer with the given limit
    pub const fn new(limit: Duration) -> Self {
        Self {
            limit,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance the clock by `delta`
    pub fn tick(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Total time allowed
    pub const fn limit(&self) -> Duration {
        self.limit
    }

    /// Time that has passed
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time left before expiry, never negative
    pub const fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed)
    }

    /// Whether the limit has been reached
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.limit
    }
}
