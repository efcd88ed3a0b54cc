// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the device notification system

pub mod advisory;
pub mod platform;
pub mod traced;

pub use advisory::{AdvisorySink, ConsoleAdvisorySink};
pub use platform::{
    LocalPlatform, NotificationPlatform, PlatformError, PresentedNotification, TrayEvent,
};
pub use traced::TracedPlatform;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use advisory::FakeAdvisorySink;
#[cfg(any(test, feature = "test-support"))]
pub use platform::{FakePlatform, PlatformCall};
