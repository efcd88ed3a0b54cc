// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use bn_adapters::PresentedNotification;
use bn_engine::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// One line per presented notification
pub fn format_notification(notification: &PresentedNotification, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{} | {}", notification.title, notification.body),
        OutputFormat::Json => {
            serde_json::to_string(&notification.payload).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

/// Report outcomes that produce no tray output
pub fn report_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Throttled => eprintln!("throttled: same alert sent within the cooldown"),
        Outcome::NotPermitted => eprintln!("skipped: notifications are not permitted"),
        Outcome::Delivered(_) | Outcome::Scheduled(_) => {}
    }
}
