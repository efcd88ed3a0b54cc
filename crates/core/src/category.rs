// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event categories: the payload discriminator and the throttle key

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of domain occurrence a notification represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Nearby,
    VeryClose,
    TripStarted,
    TripEnded,
    Delay,
    RouteChange,
    DailyReminder,
    Test,
}

impl EventCategory {
    pub const COUNT: usize = 8;

    /// Every category, in declaration order
    pub const ALL: [EventCategory; Self::COUNT] = [
        EventCategory::Nearby,
        EventCategory::VeryClose,
        EventCategory::TripStarted,
        EventCategory::TripEnded,
        EventCategory::Delay,
        EventCategory::RouteChange,
        EventCategory::DailyReminder,
        EventCategory::Test,
    ];

    /// Stable snake_case name, also used as the throttle key in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Nearby => "nearby",
            EventCategory::VeryClose => "very_close",
            EventCategory::TripStarted => "trip_started",
            EventCategory::TripEnded => "trip_ended",
            EventCategory::Delay => "delay",
            EventCategory::RouteChange => "route_change",
            EventCategory::DailyReminder => "daily_reminder",
            EventCategory::Test => "test",
        }
    }

    /// Value written to a payload's `type` field
    pub fn payload_type(&self) -> &'static str {
        match self {
            EventCategory::Nearby => "bus_nearby",
            EventCategory::VeryClose => "bus_arriving",
            other => other.as_str(),
        }
    }

    /// Inverse of [`payload_type`](Self::payload_type)
    pub fn from_payload_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.payload_type() == value)
    }

    /// Proximity alerts get re-evaluated as the bus moves; everything else
    /// is a one-shot lifecycle event.
    pub fn is_throttled(&self) -> bool {
        matches!(self, EventCategory::Nearby | EventCategory::VeryClose)
    }

    /// Dense index for per-category storage
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for EventCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
#[path = "category_tests.rs"]
mod tests;
