// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus domain events and the notification content each one renders to

use crate::category::EventCategory;
use crate::request::{NotificationRequest, Payload};
use std::time::Duration;

/// A discrete occurrence the rider may want to hear about
#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    Nearby { bus: String, distance_km: f64 },
    VeryClose { bus: String, eta_minutes: u32 },
    TripStarted { bus: String, route_name: String },
    TripEnded { bus: String },
    Delay { bus: String, reason: String },
    RouteChange { bus: String, new_route: String },
    DailyReminder { after: Duration },
    Test,
}

impl BusEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            BusEvent::Nearby { .. } => EventCategory::Nearby,
            BusEvent::VeryClose { .. } => EventCategory::VeryClose,
            BusEvent::TripStarted { .. } => EventCategory::TripStarted,
            BusEvent::TripEnded { .. } => EventCategory::TripEnded,
            BusEvent::Delay { .. } => EventCategory::Delay,
            BusEvent::RouteChange { .. } => EventCategory::RouteChange,
            BusEvent::DailyReminder { .. } => EventCategory::DailyReminder,
            BusEvent::Test => EventCategory::Test,
        }
    }

    /// Build the request for this event. Deferred events carry their delay.
    pub fn render(&self) -> NotificationRequest {
        let payload = Payload::new(self.category());
        match self {
            BusEvent::Nearby { bus, distance_km } => NotificationRequest::new(
                "🚌 Bus Approaching!",
                format!("Bus {} is {} km away.", bus, format_km(*distance_km)),
                payload
                    .with("busNumber", bus.as_str())
                    .with("distance", *distance_km),
            ),
            BusEvent::VeryClose { bus, eta_minutes } => NotificationRequest::new(
                "⚠️ Bus Almost Here!",
                format!(
                    "Bus {} arriving in ~{} minutes. Get ready!",
                    bus, eta_minutes
                ),
                payload
                    .with("busNumber", bus.as_str())
                    .with("eta", *eta_minutes),
            ),
            BusEvent::TripStarted { bus, route_name } => NotificationRequest::new(
                "🟢 Trip Started",
                format!(
                    "Driver started the trip for {}. Bus {} is on the way!",
                    route_name, bus
                ),
                payload
                    .with("busNumber", bus.as_str())
                    .with("routeName", route_name.as_str()),
            ),
            BusEvent::TripEnded { bus } => NotificationRequest::new(
                "🔴 Trip Ended",
                format!("Bus {} has completed the trip.", bus),
                payload.with("busNumber", bus.as_str()),
            ),
            BusEvent::Delay { bus, reason } => NotificationRequest::new(
                "⏰ Delay Alert",
                format!("Bus {} is delayed. Reason: {}", bus, reason),
                payload
                    .with("busNumber", bus.as_str())
                    .with("reason", reason.as_str()),
            ),
            BusEvent::RouteChange { bus, new_route } => NotificationRequest::new(
                "🔄 Route Changed",
                format!("Bus {} route changed to {}", bus, new_route),
                payload
                    .with("busNumber", bus.as_str())
                    .with("newRoute", new_route.as_str()),
            ),
            BusEvent::DailyReminder { after } => NotificationRequest::new(
                "📅 Bus Reminder",
                "Don\u{2019}t forget to check your bus timing!",
                payload,
            )
            .deferred(*after),
            BusEvent::Test => NotificationRequest::new(
                "🧪 Test Notification",
                "This is a test notification from Bus Tracker.",
                payload,
            ),
        }
    }
}

/// One decimal, halves rounded away from zero (0.85 -> "0.9")
pub fn format_km(distance_km: f64) -> String {
    format!("{:.1}", (distance_km * 10.0).round() / 10.0)
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
