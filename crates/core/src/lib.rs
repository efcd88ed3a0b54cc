// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bn-core: domain types and policy for bus notifications
//!
//! This crate provides:
//! - Event categories and the bus events that render into notification requests
//! - The per-category throttle policy
//! - Permission, device, and channel descriptors
//! - An injectable clock
//! - TOML configuration

pub mod category;
pub mod clock;
pub mod config;
pub mod event;
pub mod permission;
pub mod request;
pub mod throttle;

pub use category::{EventCategory, UnknownCategory};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, ConsentConfig, ConsentMode, NotifyConfig};
pub use event::{format_km, BusEvent};
pub use permission::{
    Advisory, ChannelConfig, DevicePlatform, DeviceProfile, Importance, PermissionState, PushToken,
};
pub use request::{
    DeliverAt, DeliveryState, NotificationId, NotificationRequest, Payload, Presentation, Priority,
};
pub use throttle::{ThrottlePolicy, DEFAULT_COOLDOWN};
