// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bn remind` - schedule the daily reminder and wait for it

use crate::adapters::Service;
use crate::output::report_outcome;
use anyhow::{Context, Result};
use bn_core::NotificationId;
use bn_engine::Outcome;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(clap::Args)]
pub struct RemindArgs {
    /// Seconds until the reminder fires
    #[arg(long = "in", value_name = "SECS")]
    pub in_secs: u64,

    /// Cancel every scheduled notification after this many seconds
    #[arg(long, value_name = "SECS")]
    pub cancel_after: Option<u64>,
}

pub async fn handle(service: &Service, args: RemindArgs) -> Result<()> {
    // Registered before scheduling so a zero delay cannot slip past
    let (tx, mut presented) = mpsc::unbounded_channel();
    let listener = service.listeners().on_received(move |n| {
        let _ = tx.send(n.id.clone());
    });

    let result = schedule_and_wait(service, &args, &mut presented).await;
    service.listeners().remove(listener);
    result
}

async fn schedule_and_wait(
    service: &Service,
    args: &RemindArgs,
    presented: &mut mpsc::UnboundedReceiver<NotificationId>,
) -> Result<()> {
    let outcome = service
        .catalogue()
        .schedule_daily_reminder(Duration::from_secs(args.in_secs))
        .await
        .context("failed to schedule the daily reminder")?;
    let Outcome::Scheduled(id) = outcome else {
        report_outcome(&outcome);
        return Ok(());
    };

    match args.cancel_after {
        Some(secs) if secs < args.in_secs => {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            service
                .cancel_all_notifications()
                .await
                .context("failed to cancel the reminder")?;
            eprintln!("reminder canceled");
        }
        _ => {
            while let Some(seen) = presented.recv().await {
                if seen == id {
                    break;
                }
            }
        }
    }
    Ok(())
}
