// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Bus notification dispatch: permission, delivery, catalogue, listeners

mod catalogue;
mod delivery;
mod gateway;
mod listener;
mod service;

pub use catalogue::{Catalogue, Outcome};
pub use delivery::Delivery;
pub use gateway::{PermissionGateway, PermissionLatch};
pub use listener::{tap_route, Callback, ListenerId, Listeners};
pub use service::{NotificationService, ServiceDeps};
