// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Injectable time source for cooldown checks

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Monotonic system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually driven clock. Starts at an arbitrary origin and only moves when told to.
#[derive(Clone, Debug)]
pub struct FakeClock {
    origin: Instant,
    current: Arc<Mutex<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            current: Arc::new(Mutex::new(origin)),
        }
    }

    /// Instant the clock was created at (t = 0)
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Time elapsed since the origin
    pub fn elapsed(&self) -> Duration {
        self.now().saturating_duration_since(self.origin)
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }

    /// Jump to `offset` past the origin. Moving backwards is allowed.
    pub fn set_offset(&self, offset: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = self.origin + offset;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
