// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Permission, device, and channel types shared by the gateway and platforms

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the user has allowed notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionState::Undetermined => f.write_str("undetermined"),
            PermissionState::Granted => f.write_str("granted"),
            PermissionState::Denied => f.write_str("denied"),
        }
    }
}

/// Opaque handle issued by the platform once permission is granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PushToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
    #[default]
    Android,
    Ios,
    Desktop,
}

/// The device class notifications are delivered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub platform: DevicePlatform,
    /// Emulators and simulators cannot receive push notifications
    pub physical: bool,
}

impl DeviceProfile {
    pub fn new(platform: DevicePlatform, physical: bool) -> Self {
        Self { platform, physical }
    }

    /// Android refuses to show anything until a channel exists
    pub fn requires_channel(&self) -> bool {
        self.platform == DevicePlatform::Android
    }

    pub fn supports_push(&self) -> bool {
        self.physical
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::new(DevicePlatform::Android, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
    Max,
}

/// Declarative description of a delivery channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub id: String,
    pub name: String,
    pub importance: Importance,
    pub vibration_pattern_ms: Vec<u64>,
    pub light_color: String,
}

impl ChannelConfig {
    pub fn bus_updates() -> Self {
        Self {
            id: "bus-updates".to_string(),
            name: "Bus Updates".to_string(),
            importance: Importance::Max,
            vibration_pattern_ms: vec![0, 250, 250, 250],
            light_color: "#FF231F7C".to_string(),
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::bus_updates()
    }
}

/// User-visible message raised instead of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    UnsupportedDevice,
    PermissionDenied,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::UnsupportedDevice => "Must use a physical device for Push Notifications",
            Advisory::PermissionDenied => "Failed to get push token for notifications!",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
#[path = "permission_tests.rs"]
mod tests;
