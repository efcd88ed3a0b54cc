// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event-to-notification catalogue
//!
//! Turns bus events into requests, runs proximity alerts through the
//! throttle, and hands the result to the delivery primitive.

use crate::delivery::Delivery;
use crate::gateway::PermissionLatch;
use bn_adapters::{NotificationPlatform, PlatformError};
use bn_core::{BusEvent, Clock, DeliverAt, NotificationId, ThrottlePolicy};
use std::sync::Arc;
use std::time::Duration;

/// What happened to a catalogue call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Handed to the platform for immediate presentation
    Delivered(NotificationId),
    /// Handed to the platform with a timer
    Scheduled(NotificationId),
    /// Same category went out within the cooldown
    Throttled,
    /// The gateway has not observed a grant
    NotPermitted,
}

impl Outcome {
    pub fn id(&self) -> Option<&NotificationId> {
        match self {
            Outcome::Delivered(id) | Outcome::Scheduled(id) => Some(id),
            Outcome::Throttled | Outcome::NotPermitted => None,
        }
    }
}

pub struct Catalogue<P, C> {
    delivery: Delivery<P>,
    throttle: Arc<ThrottlePolicy>,
    clock: C,
    cooldown: Duration,
    latch: PermissionLatch,
}

impl<P, C> Catalogue<P, C>
where
    P: NotificationPlatform,
    C: Clock,
{
    pub fn new(
        delivery: Delivery<P>,
        throttle: Arc<ThrottlePolicy>,
        clock: C,
        cooldown: Duration,
        latch: PermissionLatch,
    ) -> Self {
        Self {
            delivery,
            throttle,
            clock,
            cooldown,
            latch,
        }
    }

    pub fn throttle(&self) -> &ThrottlePolicy {
        &self.throttle
    }

    /// Render, gate, and deliver one event.
    ///
    /// Platform errors pass through untouched.
    pub async fn dispatch(&self, event: BusEvent) -> Result<Outcome, PlatformError> {
        let category = event.category();

        if !self.latch.is_granted() {
            tracing::debug!(%category, "skipped: permission not granted");
            return Ok(Outcome::NotPermitted);
        }

        if category.is_throttled()
            && !self
                .throttle
                .permit(category, self.clock.now(), self.cooldown)
        {
            return Ok(Outcome::Throttled);
        }

        let request = event.render();
        let outcome = match request.deliver_at() {
            DeliverAt::Immediate => Outcome::Delivered(self.delivery.deliver_now(request).await?),
            DeliverAt::After(delay) => {
                Outcome::Scheduled(self.delivery.deliver_after(request, delay).await?)
            }
        };
        tracing::info!(%category, ?outcome, "dispatched");
        Ok(outcome)
    }

    pub async fn notify_bus_nearby(
        &self,
        bus: &str,
        distance_km: f64,
    ) -> Result<Outcome, PlatformError> {
        self.dispatch(BusEvent::Nearby {
            bus: bus.to_string(),
            distance_km,
        })
        .await
    }

    pub async fn notify_bus_very_close(
        &self,
        bus: &str,
        eta_minutes: u32,
    ) -> Result<Outcome, PlatformError> {
        self.dispatch(BusEvent::VeryClose {
            bus: bus.to_string(),
            eta_minutes,
        })
        .await
    }

    pub async fn notify_trip_started(
        &self,
        bus: &str,
        route_name: &str,
    ) -> Result<Outcome, PlatformError> {
        self.dispatch(BusEvent::TripStarted {
            bus: bus.to_string(),
            route_name: route_name.to_string(),
        })
        .await
    }

    pub async fn notify_trip_ended(&self, bus: &str) -> Result<Outcome, PlatformError> {
        self.dispatch(BusEvent::TripEnded {
            bus: bus.to_string(),
        })
        .await
    }

    pub async fn notify_delay(&self, bus: &str, reason: &str) -> Result<Outcome, PlatformError> {
        self.dispatch(BusEvent::Delay {
            bus: bus.to_string(),
            reason: reason.to_string(),
        })
        .await
    }

    pub async fn notify_route_change(
        &self,
        bus: &str,
        new_route: &str,
    ) -> Result<Outcome, PlatformError> {
        self.dispatch(BusEvent::RouteChange {
            bus: bus.to_string(),
            new_route: new_route.to_string(),
        })
        .await
    }

    pub async fn schedule_daily_reminder(&self, after: Duration) -> Result<Outcome, PlatformError> {
        self.dispatch(BusEvent::DailyReminder { after }).await
    }

    /// Never throttled
    pub async fn test_notification(&self) -> Result<Outcome, PlatformError> {
        self.dispatch(BusEvent::Test).await
    }
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
