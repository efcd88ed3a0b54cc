// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Permission & channel acquisition

use bn_adapters::{AdvisorySink, NotificationPlatform, PlatformError};
use bn_core::{Advisory, ChannelConfig, PermissionState, PushToken};
use std::sync::{Arc, Mutex};

/// Latest permission the gateway observed.
///
/// Written only by [`PermissionGateway::acquire`]; everything else reads it.
#[derive(Clone, Debug, Default)]
pub struct PermissionLatch {
    observed: Arc<Mutex<PermissionState>>,
}

impl PermissionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observed(&self) -> PermissionState {
        *self.observed.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_granted(&self) -> bool {
        self.observed().is_granted()
    }

    pub(crate) fn record(&self, state: PermissionState) {
        *self.observed.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }
}

/// Registers the delivery channel and obtains the user's consent
pub struct PermissionGateway<P, A> {
    platform: P,
    advisories: A,
    channel: ChannelConfig,
    project_id: String,
    latch: PermissionLatch,
}

impl<P, A> PermissionGateway<P, A>
where
    P: NotificationPlatform,
    A: AdvisorySink,
{
    pub fn new(
        platform: P,
        advisories: A,
        channel: ChannelConfig,
        project_id: impl Into<String>,
        latch: PermissionLatch,
    ) -> Self {
        Self {
            platform,
            advisories,
            channel,
            project_id: project_id.into(),
            latch,
        }
    }

    pub fn latch(&self) -> &PermissionLatch {
        &self.latch
    }

    /// Register the channel, prompt if needed, and fetch a push token.
    ///
    /// Returns `Ok(None)` after showing an advisory when the device cannot
    /// receive push notifications or the user said no. Never retries; call
    /// again to re-prompt.
    pub async fn acquire(&self) -> Result<Option<PushToken>, PlatformError> {
        let device = self.platform.device();

        if device.requires_channel() {
            self.platform.register_channel(&self.channel).await?;
        }

        if !device.supports_push() {
            tracing::info!(platform = ?device.platform, "push unsupported on this device");
            self.advisories.advise(Advisory::UnsupportedDevice);
            return Ok(None);
        }

        let mut state = self.platform.permission_state().await?;
        if state == PermissionState::Undetermined {
            state = self.platform.request_consent().await?;
        }
        self.latch.record(state);

        if !state.is_granted() {
            tracing::info!(%state, "notifications not permitted");
            self.advisories.advise(Advisory::PermissionDenied);
            return Ok(None);
        }

        let token = self.platform.delivery_token(&self.project_id).await?;
        tracing::info!(token = %token, "push token acquired");
        Ok(Some(token))
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
