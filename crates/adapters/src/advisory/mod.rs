// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Where user-visible advisories go

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeAdvisorySink;

use bn_core::Advisory;

/// Shows an advisory to the user. Advisories are not errors and cannot fail.
pub trait AdvisorySink: Clone + Send + Sync + 'static {
    fn advise(&self, advisory: Advisory);
}

/// Prints advisories to stderr
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleAdvisorySink;

impl AdvisorySink for ConsoleAdvisorySink {
    fn advise(&self, advisory: Advisory) {
        tracing::info!(?advisory, "advisory shown");
        eprintln!("notice: {}", advisory);
    }
}
