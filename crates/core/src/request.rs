// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification requests and their payloads

use crate::category::EventCategory;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

/// Structured data attached to a notification.
///
/// Always carries a `type` field naming the category, so a tap handler can
/// tell notifications apart without reading the body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new(category: EventCategory) -> Self {
        let mut map = Map::new();
        map.insert(
            "type".to_string(),
            Value::String(category.payload_type().to_string()),
        );
        Self(map)
    }

    /// Add a category-specific field. `type` cannot be overwritten.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if key != "type" {
            self.0.insert(key.to_string(), value.into());
        }
        self
    }

    /// Raw `type` string, if present
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Category named by the `type` field
    pub fn category(&self) -> Option<EventCategory> {
        self.kind().and_then(EventCategory::from_payload_type)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// When the platform should present a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliverAt {
    #[default]
    Immediate,
    After(Duration),
}

impl DeliverAt {
    pub fn delay(&self) -> Option<Duration> {
        match self {
            DeliverAt::Immediate => None,
            DeliverAt::After(d) => Some(*d),
        }
    }
}

/// Urgency hint for the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Default,
    High,
}

/// How the tray should surface a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub sound: bool,
    pub priority: Priority,
}

/// A single notification to hand to the platform. Built fresh for every send.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    title: String,
    body: String,
    payload: Payload,
    deliver_at: DeliverAt,
}

impl NotificationRequest {
    /// Request for immediate presentation
    pub fn new(title: impl Into<String>, body: impl Into<String>, payload: Payload) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            payload,
            deliver_at: DeliverAt::Immediate,
        }
    }

    /// Same content, presented after `delay`
    pub fn deferred(self, delay: Duration) -> Self {
        Self {
            deliver_at: DeliverAt::After(delay),
            ..self
        }
    }

    /// Same content, presented right away
    pub fn immediate(self) -> Self {
        Self {
            deliver_at: DeliverAt::Immediate,
            ..self
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn deliver_at(&self) -> DeliverAt {
        self.deliver_at
    }

    /// Every request plays a sound; immediate ones are high priority
    pub fn presentation(&self) -> Presentation {
        let priority = match self.deliver_at {
            DeliverAt::Immediate => Priority::High,
            DeliverAt::After(_) => Priority::Default,
        };
        Presentation {
            sound: true,
            priority,
        }
    }

    pub fn category(&self) -> Option<EventCategory> {
        self.payload.category()
    }
}

/// Identifier the platform assigns to an accepted request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a single request.
///
/// ```text
/// created -> presented                      (immediate)
/// created -> scheduled -> presented         (deferred)
/// created -> scheduled -> canceled          (deferred, cancel_all)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryState {
    Created,
    Scheduled,
    Presented,
    Canceled,
}

impl DeliveryState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryState::Presented | DeliveryState::Canceled)
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
