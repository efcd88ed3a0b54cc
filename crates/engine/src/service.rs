// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The notification service handed to the UI

use crate::catalogue::{Catalogue, Outcome};
use crate::delivery::Delivery;
use crate::gateway::{PermissionGateway, PermissionLatch};
use crate::listener::Listeners;
use bn_adapters::{AdvisorySink, NotificationPlatform, PlatformError};
use bn_core::{Clock, NotifyConfig, PermissionState, PushToken, ThrottlePolicy};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Adapter dependencies for the service
pub struct ServiceDeps<P, A> {
    pub platform: P,
    pub advisories: A,
}

/// Gateway, catalogue, and listener registry wired to one platform
pub struct NotificationService<P, A, C: Clock> {
    platform: P,
    gateway: PermissionGateway<P, A>,
    catalogue: Catalogue<P, C>,
    delivery: Delivery<P>,
    listeners: Listeners,
}

impl<P, A, C> NotificationService<P, A, C>
where
    P: NotificationPlatform,
    A: AdvisorySink,
    C: Clock,
{
    pub fn new(deps: ServiceDeps<P, A>, clock: C, config: &NotifyConfig) -> Self {
        let latch = PermissionLatch::new();
        let delivery = Delivery::new(deps.platform.clone());
        let gateway = PermissionGateway::new(
            deps.platform.clone(),
            deps.advisories,
            config.channel.clone(),
            config.project_id.clone(),
            latch.clone(),
        );
        let catalogue = Catalogue::new(
            delivery.clone(),
            Arc::new(ThrottlePolicy::new()),
            clock,
            config.cooldown,
            latch,
        );
        Self {
            platform: deps.platform,
            gateway,
            catalogue,
            delivery,
            listeners: Listeners::new(),
        }
    }

    /// Register the channel and ask for permission.
    ///
    /// `None` means an advisory was shown and later notifications will be
    /// reported as [`Outcome::NotPermitted`].
    pub async fn setup_notifications(&self) -> Result<Option<PushToken>, PlatformError> {
        self.gateway.acquire().await
    }

    /// Per-category entry points
    pub fn catalogue(&self) -> &Catalogue<P, C> {
        &self.catalogue
    }

    pub async fn test_notification(&self) -> Result<Outcome, PlatformError> {
        self.catalogue.test_notification().await
    }

    pub async fn cancel_all_notifications(&self) -> Result<(), PlatformError> {
        self.delivery.cancel_all().await
    }

    /// Latest permission observed by [`setup_notifications`](Self::setup_notifications)
    pub fn permission_state(&self) -> PermissionState {
        self.gateway.latch().observed()
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Start forwarding tray events to the listener registry
    pub fn attach_listeners(&self) -> JoinHandle<()> {
        self.listeners.attach(&self.platform)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
