// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery primitive: a thin facade over the platform's schedule call

use bn_adapters::{NotificationPlatform, PlatformError};
use bn_core::{DeliverAt, NotificationId, NotificationRequest, PermissionState};
use std::time::Duration;

/// Hands requests to the platform. Failures are returned, never retried.
#[derive(Clone)]
pub struct Delivery<P> {
    platform: P,
}

impl<P: NotificationPlatform> Delivery<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Present `request` right away
    pub async fn deliver_now(
        &self,
        request: NotificationRequest,
    ) -> Result<NotificationId, PlatformError> {
        self.platform.schedule(&request.immediate()).await
    }

    /// Present `request` once `delay` has passed. The platform owns the timer.
    pub async fn deliver_after(
        &self,
        request: NotificationRequest,
        delay: Duration,
    ) -> Result<NotificationId, PlatformError> {
        self.platform.schedule(&request.deferred(delay)).await
    }

    /// Route by the request's own trigger
    pub async fn deliver(
        &self,
        request: NotificationRequest,
    ) -> Result<NotificationId, PlatformError> {
        match request.deliver_at() {
            DeliverAt::Immediate => self.deliver_now(request).await,
            DeliverAt::After(delay) => self.deliver_after(request, delay).await,
        }
    }

    /// Withdraw every scheduled request not yet presented
    pub async fn cancel_all(&self) -> Result<(), PlatformError> {
        self.platform.cancel_all_scheduled().await
    }

    /// Read-only probe; never prompts
    pub async fn query_permission(&self) -> Result<PermissionState, PlatformError> {
        self.platform.permission_state().await
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
