// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification platform for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    NotificationPlatform, PlatformError, PresentedNotification, TrayEvent, TRAY_EVENT_CAPACITY,
};
use async_trait::async_trait;
use bn_core::{
    ChannelConfig, DeliverAt, DeliveryState, DeviceProfile, NotificationId, NotificationRequest,
    PermissionState, PushToken,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

/// Recorded call to the platform
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    RegisterChannel(ChannelConfig),
    PermissionState,
    RequestConsent,
    DeliveryToken { project_id: String },
    Schedule(NotificationRequest),
    CancelAllScheduled,
}

struct Entry {
    notification: PresentedNotification,
    fire_at: Duration,
    state: DeliveryState,
}

struct FakeState {
    calls: Vec<PlatformCall>,
    device: DeviceProfile,
    permission: PermissionState,
    consent_answer: PermissionState,
    schedule_fails: bool,
    consent_fails: bool,
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Fake platform with call recording and a manually clocked tray.
///
/// Immediate requests are presented on `schedule` when permission is granted.
/// Deferred requests wait until [`advance`](Self::advance) moves the tray
/// clock past their delay. Requests arriving without permission stay in
/// `Created` and are never presented.
#[derive(Clone)]
pub struct FakePlatform {
    state: Arc<Mutex<FakeState>>,
    events: broadcast::Sender<TrayEvent>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePlatform {
    /// Physical Android device, permission undetermined, consent granted on prompt
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(TRAY_EVENT_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                device: DeviceProfile::default(),
                permission: PermissionState::Undetermined,
                consent_answer: PermissionState::Granted,
                schedule_fails: false,
                consent_fails: false,
                now: Duration::ZERO,
                next_id: 0,
                entries: Vec::new(),
            })),
            events,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_device(self, device: DeviceProfile) -> Self {
        self.lock().device = device;
        self
    }

    /// Permission the platform reports before any prompt
    pub fn set_permission(&self, permission: PermissionState) {
        self.lock().permission = permission;
    }

    /// What the user answers when prompted
    pub fn set_consent_answer(&self, answer: PermissionState) {
        self.lock().consent_answer = answer;
    }

    /// Make every `schedule` call fail
    pub fn set_schedule_fails(&self, fails: bool) {
        self.lock().schedule_fails = fails;
    }

    /// Make the consent prompt fail
    pub fn set_consent_fails(&self, fails: bool) {
        self.lock().consent_fails = fails;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.lock().calls.clone()
    }

    /// Requests handed to `schedule`, in order
    pub fn scheduled_requests(&self) -> Vec<NotificationRequest> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                PlatformCall::Schedule(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// Notifications the tray has shown, in presentation order
    pub fn presented(&self) -> Vec<PresentedNotification> {
        let state = self.lock();
        let mut shown: Vec<_> = state
            .entries
            .iter()
            .filter(|e| e.state == DeliveryState::Presented)
            .collect();
        shown.sort_by_key(|e| e.fire_at);
        shown.iter().map(|e| e.notification.clone()).collect()
    }

    pub fn state_of(&self, id: &NotificationId) -> Option<DeliveryState> {
        self.lock()
            .entries
            .iter()
            .find(|e| &e.notification.id == id)
            .map(|e| e.state)
    }

    /// Move the tray clock forward, presenting whatever comes due
    pub fn advance(&self, by: Duration) {
        let fired = {
            let mut state = self.lock();
            state.now += by;
            let now = state.now;
            let granted = state.permission.is_granted();
            let mut fired = Vec::new();
            for entry in state.entries.iter_mut() {
                if entry.state == DeliveryState::Scheduled && entry.fire_at <= now && granted {
                    entry.state = DeliveryState::Presented;
                    fired.push(entry.notification.clone());
                }
            }
            fired
        };
        for notification in fired {
            let _ = self.events.send(TrayEvent::Received(notification));
        }
    }

    /// Simulate the user tapping a presented notification
    pub fn tap(&self, id: &NotificationId) -> bool {
        let notification = self
            .lock()
            .entries
            .iter()
            .find(|e| &e.notification.id == id && e.state == DeliveryState::Presented)
            .map(|e| e.notification.clone());
        match notification {
            Some(n) => {
                let _ = self.events.send(TrayEvent::Tapped(n));
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl NotificationPlatform for FakePlatform {
    fn device(&self) -> DeviceProfile {
        self.lock().device
    }

    async fn register_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        self.lock()
            .calls
            .push(PlatformCall::RegisterChannel(channel.clone()));
        Ok(())
    }

    async fn permission_state(&self) -> Result<PermissionState, PlatformError> {
        let mut state = self.lock();
        state.calls.push(PlatformCall::PermissionState);
        Ok(state.permission)
    }

    async fn request_consent(&self) -> Result<PermissionState, PlatformError> {
        let mut state = self.lock();
        state.calls.push(PlatformCall::RequestConsent);
        if state.consent_fails {
            return Err(PlatformError::Consent("prompt dismissed".to_string()));
        }
        state.permission = state.consent_answer;
        Ok(state.permission)
    }

    async fn delivery_token(&self, project_id: &str) -> Result<PushToken, PlatformError> {
        let mut state = self.lock();
        state.calls.push(PlatformCall::DeliveryToken {
            project_id: project_id.to_string(),
        });
        if !state.permission.is_granted() {
            return Err(PlatformError::TokenUnavailable("permission not granted".to_string()));
        }
        Ok(PushToken::new(format!("FakePushToken[{}]", project_id)))
    }

    async fn schedule(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationId, PlatformError> {
        let (id, presented) = {
            let mut state = self.lock();
            state.calls.push(PlatformCall::Schedule(request.clone()));
            if state.schedule_fails {
                return Err(PlatformError::Rejected("schedule failed".to_string()));
            }

            state.next_id += 1;
            let id = NotificationId::new(format!("fake-{}", state.next_id));
            let notification = PresentedNotification::from_request(id.clone(), request);
            let granted = state.permission.is_granted();

            let (fire_at, entry_state) = match request.deliver_at() {
                _ if !granted => (state.now, DeliveryState::Created),
                DeliverAt::Immediate => (state.now, DeliveryState::Presented),
                DeliverAt::After(delay) => (state.now + delay, DeliveryState::Scheduled),
            };

            state.entries.push(Entry {
                notification: notification.clone(),
                fire_at,
                state: entry_state,
            });
            (id, (entry_state == DeliveryState::Presented).then_some(notification))
        };

        if let Some(notification) = presented {
            let _ = self.events.send(TrayEvent::Received(notification));
        }
        Ok(id)
    }

    async fn cancel_all_scheduled(&self) -> Result<(), PlatformError> {
        let mut state = self.lock();
        state.calls.push(PlatformCall::CancelAllScheduled);
        for entry in state.entries.iter_mut() {
            if entry.state == DeliveryState::Scheduled {
                entry.state = DeliveryState::Canceled;
            }
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<TrayEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
