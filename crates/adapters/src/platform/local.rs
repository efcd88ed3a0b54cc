// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process notification tray.
//!
//! Presents immediately by broadcasting a [`TrayEvent::Received`], keeps
//! deferred requests on tokio timers, and drops everything while permission
//! is not granted.

use super::{
    NotificationPlatform, PlatformError, PresentedNotification, TrayEvent, TRAY_EVENT_CAPACITY,
};
use async_trait::async_trait;
use bn_core::{
    ChannelConfig, ConsentMode, DeliverAt, DeviceProfile, NotificationId, NotificationRequest,
    PermissionState, PushToken,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct LocalPlatform {
    inner: Arc<Inner>,
}

struct Inner {
    device: DeviceProfile,
    consent: ConsentMode,
    permission: Mutex<PermissionState>,
    channels: Mutex<HashMap<String, ChannelConfig>>,
    token: Mutex<Option<PushToken>>,
    pending: Mutex<HashMap<NotificationId, JoinHandle<()>>>,
    badge: AtomicU32,
    events: broadcast::Sender<TrayEvent>,
}

impl LocalPlatform {
    pub fn new(device: DeviceProfile, consent: ConsentMode) -> Self {
        let (events, _) = broadcast::channel(TRAY_EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                device,
                consent,
                permission: Mutex::new(PermissionState::Undetermined),
                channels: Mutex::new(HashMap::new()),
                token: Mutex::new(None),
                pending: Mutex::new(HashMap::new()),
                badge: AtomicU32::new(0),
                events,
            }),
        }
    }

    /// Registered channels by id
    pub fn channels(&self) -> Vec<ChannelConfig> {
        self.inner
            .channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    /// Number of deferred requests still waiting on their timer
    pub fn pending_count(&self) -> usize {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Notifications presented so far; the foreground tray badges each one
    pub fn badge_count(&self) -> u32 {
        self.inner.badge.load(Ordering::Relaxed)
    }

    /// Report a tap on a presented notification
    pub fn tap(&self, notification: PresentedNotification) {
        let _ = self.inner.events.send(TrayEvent::Tapped(notification));
    }

    async fn ask_on_terminal() -> Result<PermissionState, PlatformError> {
        let mut stderr = tokio::io::stderr();
        stderr.write_all(b"Allow bus notifications? [y/N] ").await?;
        stderr.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;

        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(PermissionState::Granted),
            _ => Ok(PermissionState::Denied),
        }
    }
}

impl Inner {
    fn permission(&self) -> PermissionState {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn present(&self, notification: PresentedNotification) {
        if !self.permission().is_granted() {
            tracing::debug!(id = %notification.id, "dropped: permission not granted");
            return;
        }
        self.badge.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            id = %notification.id,
            title = %notification.title,
            sound = notification.presentation.sound,
            priority = ?notification.presentation.priority,
            "presented"
        );
        let _ = self.events.send(TrayEvent::Received(notification));
    }
}

#[async_trait]
impl NotificationPlatform for LocalPlatform {
    fn device(&self) -> DeviceProfile {
        self.inner.device
    }

    async fn register_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        self.inner
            .channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(channel.id.clone(), channel.clone());
        Ok(())
    }

    async fn permission_state(&self) -> Result<PermissionState, PlatformError> {
        Ok(self.inner.permission())
    }

    async fn request_consent(&self) -> Result<PermissionState, PlatformError> {
        let current = self.inner.permission();
        if current != PermissionState::Undetermined {
            return Ok(current);
        }

        let answer = match self.inner.consent {
            ConsentMode::Grant => PermissionState::Granted,
            ConsentMode::Deny => PermissionState::Denied,
            ConsentMode::Ask => Self::ask_on_terminal().await?,
        };

        *self
            .inner
            .permission
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = answer;
        Ok(answer)
    }

    async fn delivery_token(&self, project_id: &str) -> Result<PushToken, PlatformError> {
        if !self.inner.permission().is_granted() {
            return Err(PlatformError::TokenUnavailable("permission not granted".to_string()));
        }

        let mut token = self.inner.token.lock().unwrap_or_else(|e| e.into_inner());
        let token = token.get_or_insert_with(|| {
            PushToken::new(format!(
                "LocalPushToken[{}:{}]",
                project_id,
                uuid::Uuid::new_v4().simple()
            ))
        });
        Ok(token.clone())
    }

    async fn schedule(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationId, PlatformError> {
        let id = NotificationId::new(uuid::Uuid::new_v4().to_string());
        let notification = PresentedNotification::from_request(id.clone(), request);

        match request.deliver_at() {
            DeliverAt::Immediate => self.inner.present(notification),
            DeliverAt::After(delay) => {
                // Hold the lock across spawn so the timer cannot fire before it is tracked
                let mut pending = self.inner.pending.lock().unwrap_or_else(|e| e.into_inner());
                let handle = spawn_timer(Arc::clone(&self.inner), delay, notification);
                pending.insert(id.clone(), handle);
            }
        }

        Ok(id)
    }

    async fn cancel_all_scheduled(&self) -> Result<(), PlatformError> {
        let drained: Vec<_> = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain()
            .collect();

        for (id, handle) in drained {
            handle.abort();
            tracing::debug!(%id, "canceled");
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<TrayEvent> {
        self.inner.events.subscribe()
    }
}

fn spawn_timer(
    inner: Arc<Inner>,
    delay: Duration,
    notification: PresentedNotification,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        // Gone from the map means cancel_all already claimed it
        let still_pending = inner
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&notification.id)
            .is_some();
        if still_pending {
            inner.present(notification);
        }
    })
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
