// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bn demo` - replay a simulated trip for one bus

use crate::adapters::Service;
use crate::output::report_outcome;
use anyhow::{Context, Result};
use bn_core::BusEvent;
use std::time::Duration;

const DEMO_BUS: &str = "KA-05-1234";

#[derive(clap::Args)]
pub struct DemoArgs {
    /// Length of one simulated second, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub step_ms: u64,
}

/// Events and the step at which each fires
pub fn script() -> Vec<(u32, BusEvent)> {
    let bus = DEMO_BUS.to_string();
    vec![
        (
            3,
            BusEvent::Nearby {
                bus: bus.clone(),
                distance_km: 0.9,
            },
        ),
        (
            8,
            BusEvent::VeryClose {
                bus: bus.clone(),
                eta_minutes: 2,
            },
        ),
        (
            12,
            BusEvent::TripStarted {
                bus: bus.clone(),
                route_name: "Route-1".to_string(),
            },
        ),
        (16, BusEvent::TripEnded { bus }),
    ]
}

pub async fn handle(service: &Service, args: DemoArgs) -> Result<()> {
    let step = Duration::from_millis(args.step_ms);
    let start = tokio::time::Instant::now();

    for (at, event) in script() {
        tokio::time::sleep_until(start + step * at).await;
        let category = event.category();
        tracing::debug!(%category, step = at, "demo event");
        let outcome = service
            .catalogue()
            .dispatch(event)
            .await
            .with_context(|| format!("demo step {} ({}) failed", at, category))?;
        report_outcome(&outcome);
    }
    Ok(())
}
