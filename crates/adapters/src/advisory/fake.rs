// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording advisory sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::AdvisorySink;
use bn_core::Advisory;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct FakeAdvisorySink {
    shown: Arc<Mutex<Vec<Advisory>>>,
}

impl FakeAdvisorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advisories shown so far
    pub fn shown(&self) -> Vec<Advisory> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl AdvisorySink for FakeAdvisorySink {
    fn advise(&self, advisory: Advisory) {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(advisory);
    }
}
