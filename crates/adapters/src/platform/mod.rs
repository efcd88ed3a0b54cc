// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The platform notification boundary

mod local;

pub use local::LocalPlatform;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePlatform, PlatformCall};

use async_trait::async_trait;
use bn_core::{
    ChannelConfig, DeviceProfile, NotificationId, NotificationRequest, Payload, PermissionState,
    Presentation, PushToken,
};
use thiserror::Error;
use tokio::sync::broadcast;

/// Errors from platform calls
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform rejected the request: {0}")]
    Rejected(String),
    #[error("channel registration failed: {0}")]
    Channel(String),
    #[error("push token unavailable: {0}")]
    TokenUnavailable(String),
    #[error("consent prompt failed: {0}")]
    Consent(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A notification as the tray showed it
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedNotification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub payload: Payload,
    pub presentation: Presentation,
}

impl PresentedNotification {
    pub fn from_request(id: NotificationId, request: &NotificationRequest) -> Self {
        Self {
            id,
            title: request.title().to_string(),
            body: request.body().to_string(),
            payload: request.payload().clone(),
            presentation: request.presentation(),
        }
    }
}

/// What the tray reports back
#[derive(Debug, Clone, PartialEq)]
pub enum TrayEvent {
    /// Presented while the app was listening
    Received(PresentedNotification),
    /// The user tapped a presented notification
    Tapped(PresentedNotification),
}

impl TrayEvent {
    pub fn notification(&self) -> &PresentedNotification {
        match self {
            TrayEvent::Received(n) | TrayEvent::Tapped(n) => n,
        }
    }
}

/// Capacity of the tray event broadcast channel
pub const TRAY_EVENT_CAPACITY: usize = 64;

/// Adapter for the device's notification system
#[async_trait]
pub trait NotificationPlatform: Clone + Send + Sync + 'static {
    /// Device class this platform runs on
    fn device(&self) -> DeviceProfile;

    /// Create or update a delivery channel. Idempotent.
    async fn register_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError>;

    /// Current permission, without prompting
    async fn permission_state(&self) -> Result<PermissionState, PlatformError>;

    /// Prompt the user and return their answer
    async fn request_consent(&self) -> Result<PermissionState, PlatformError>;

    /// Push token for `project_id`. Only valid after permission is granted.
    async fn delivery_token(&self, project_id: &str) -> Result<PushToken, PlatformError>;

    /// Present or schedule `request` according to its trigger
    async fn schedule(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationId, PlatformError>;

    /// Withdraw every scheduled request that has not been presented yet
    async fn cancel_all_scheduled(&self) -> Result<(), PlatformError>;

    /// Stream of received and tapped notifications
    fn subscribe(&self) -> broadcast::Receiver<TrayEvent>;
}
