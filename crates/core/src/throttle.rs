// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-category cooldown gate

use crate::category::EventCategory;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cooldown applied when none is configured
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(60);

/// Remembers when each category last got through.
///
/// One lock per category: the check-and-set for a category is atomic, and
/// categories never wait on each other. Entries are never evicted; the
/// category set is fixed, so the state is bounded.
#[derive(Debug, Default)]
pub struct ThrottlePolicy {
    last_permitted: [Mutex<Option<Instant>>; EventCategory::COUNT],
}

impl ThrottlePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records `now` if `category` has never been permitted
    /// or its last permit is at least `cooldown` old. Otherwise returns false
    /// and leaves the state untouched.
    pub fn permit(&self, category: EventCategory, now: Instant, cooldown: Duration) -> bool {
        let mut slot = self.last_permitted[category.index()]
            .lock()
            .unwrap_or_else(|e| e.into_inner());

        let allowed = match *slot {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= cooldown,
        };

        if allowed {
            *slot = Some(now);
        } else {
            tracing::debug!(%category, ?cooldown, "suppressed by cooldown");
        }
        allowed
    }

    /// When `category` last passed, if ever
    pub fn last_permitted(&self, category: EventCategory) -> Option<Instant> {
        *self.last_permitted[category.index()]
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "throttle_tests.rs"]
mod tests;
