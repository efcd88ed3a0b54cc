// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of tray listeners

use bn_adapters::{NotificationPlatform, PresentedNotification, TrayEvent};
use bn_core::{EventCategory, Payload};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Callback invoked with the presented notification and its full payload map
pub type Callback = Arc<dyn Fn(&PresentedNotification) + Send + Sync>;

/// Handle returned on registration, used to remove the listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListenerKind {
    /// Notification presented while listening
    Received,
    /// User tapped a notification
    Response,
}

/// Routes tray events to registered callbacks
#[derive(Clone, Default)]
pub struct Listeners {
    next_id: Arc<AtomicU64>,
    entries: Arc<RwLock<HashMap<ListenerId, (ListenerKind, Callback)>>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_received(
        &self,
        callback: impl Fn(&PresentedNotification) + Send + Sync + 'static,
    ) -> ListenerId {
        self.insert(ListenerKind::Received, Arc::new(callback))
    }

    pub fn on_response(
        &self,
        callback: impl Fn(&PresentedNotification) + Send + Sync + 'static,
    ) -> ListenerId {
        self.insert(ListenerKind::Response, Arc::new(callback))
    }

    /// Tear a listener down. Returns false if it was already gone.
    pub fn remove(&self, id: ListenerId) -> bool {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every listener registered for this kind of tray event
    pub fn dispatch(&self, event: &TrayEvent) {
        let kind = match event {
            TrayEvent::Received(_) => ListenerKind::Received,
            TrayEvent::Tapped(_) => ListenerKind::Response,
        };
        // Callbacks run outside the lock so they may register or remove listeners
        let callbacks: Vec<Callback> = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        let notification = event.notification();
        for callback in callbacks {
            callback(notification);
        }
    }

    /// Pump the platform's tray events into this registry.
    ///
    /// Abort the returned handle to tear the bridge down.
    pub fn attach<P: NotificationPlatform>(&self, platform: &P) -> JoinHandle<()> {
        let mut rx = platform.subscribe();
        let listeners = self.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => listeners.dispatch(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "listener bridge lagged, tray events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            tracing::debug!("listener bridge closed");
        })
    }

    fn insert(&self, kind: ListenerKind, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, (kind, callback));
        tracing::debug!(%id, ?kind, "listener registered");
        id
    }
}

/// Screen to open for a tapped notification, read from its payload `type`
pub fn tap_route(payload: &Payload) -> Option<EventCategory> {
    payload.category()
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
