// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced platform wrapper for consistent observability

use crate::platform::{NotificationPlatform, PlatformError, TrayEvent};
use async_trait::async_trait;
use bn_core::{
    ChannelConfig, DeviceProfile, NotificationId, NotificationRequest, PermissionState, PushToken,
};
use tokio::sync::broadcast;
use tracing::Instrument;

/// Wrapper that adds tracing to any NotificationPlatform
#[derive(Clone)]
pub struct TracedPlatform<P> {
    inner: P,
}

impl<P> TracedPlatform<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: NotificationPlatform> NotificationPlatform for TracedPlatform<P> {
    fn device(&self) -> DeviceProfile {
        self.inner.device()
    }

    async fn register_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        let span = tracing::info_span!("platform.register_channel", channel = %channel.id);
        async {
            let result = self.inner.register_channel(channel).await;
            match &result {
                Ok(()) => tracing::debug!(importance = ?channel.importance, "channel registered"),
                Err(e) => tracing::error!(error = %e, "channel registration failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn permission_state(&self) -> Result<PermissionState, PlatformError> {
        let result = self.inner.permission_state().await;
        tracing::trace!(state = ?result.as_ref().ok(), "permission checked");
        result
    }

    async fn request_consent(&self) -> Result<PermissionState, PlatformError> {
        let span = tracing::info_span!("platform.request_consent");
        async {
            tracing::info!("prompting for consent");
            let start = std::time::Instant::now();
            let result = self.inner.request_consent().await;
            let elapsed = start.elapsed();

            match &result {
                Ok(state) => tracing::info!(
                    %state,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "consent answered"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "consent prompt failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn delivery_token(&self, project_id: &str) -> Result<PushToken, PlatformError> {
        let span = tracing::info_span!("platform.delivery_token", project_id);
        async {
            // Precondition: the token is scoped to a project
            if project_id.trim().is_empty() {
                tracing::error!("project id is empty");
                return Err(PlatformError::TokenUnavailable("project id is empty".to_string()));
            }

            let result = self.inner.delivery_token(project_id).await;
            match &result {
                Ok(_) => tracing::debug!("token issued"),
                Err(e) => tracing::error!(error = %e, "token request failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn schedule(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationId, PlatformError> {
        let span = tracing::info_span!(
            "platform.schedule",
            kind = request.payload().kind().unwrap_or("unknown"),
            delay = ?request.deliver_at().delay(),
        );
        async {
            tracing::debug!(title = request.title(), "submitting");
            let result = self.inner.schedule(request).await;
            match &result {
                Ok(id) => tracing::info!(%id, "accepted"),
                Err(e) => tracing::error!(error = %e, "schedule failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn cancel_all_scheduled(&self) -> Result<(), PlatformError> {
        let span = tracing::info_span!("platform.cancel_all");
        async {
            let result = self.inner.cancel_all_scheduled().await;
            match &result {
                Ok(()) => tracing::info!("scheduled notifications canceled"),
                Err(e) => tracing::warn!(error = %e, "cancel failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    fn subscribe(&self) -> broadcast::Receiver<TrayEvent> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
