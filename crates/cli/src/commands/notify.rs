// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bn notify <category>` - send one bus notification

use crate::adapters::Service;
use anyhow::{Context, Result};
use bn_core::BusEvent;
use bn_engine::Outcome;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum NotifyCommand {
    /// Bus is approaching (throttled)
    Nearby {
        #[arg(long)]
        bus: String,
        /// Distance in kilometres
        #[arg(long)]
        distance: f64,
    },
    /// Bus is almost here (throttled)
    VeryClose {
        #[arg(long)]
        bus: String,
        /// Minutes until arrival
        #[arg(long)]
        eta: u32,
    },
    /// Driver started the trip
    TripStarted {
        #[arg(long)]
        bus: String,
        #[arg(long)]
        route: String,
    },
    /// Trip completed
    TripEnded {
        #[arg(long)]
        bus: String,
    },
    /// Bus is delayed
    Delay {
        #[arg(long)]
        bus: String,
        #[arg(long)]
        reason: String,
    },
    /// Bus was moved to another route
    RouteChange {
        #[arg(long)]
        bus: String,
        #[arg(long)]
        route: String,
    },
}

impl NotifyCommand {
    pub fn into_event(self) -> BusEvent {
        match self {
            NotifyCommand::Nearby { bus, distance } => BusEvent::Nearby {
                bus,
                distance_km: distance,
            },
            NotifyCommand::VeryClose { bus, eta } => BusEvent::VeryClose {
                bus,
                eta_minutes: eta,
            },
            NotifyCommand::TripStarted { bus, route } => BusEvent::TripStarted {
                bus,
                route_name: route,
            },
            NotifyCommand::TripEnded { bus } => BusEvent::TripEnded { bus },
            NotifyCommand::Delay { bus, reason } => BusEvent::Delay { bus, reason },
            NotifyCommand::RouteChange { bus, route } => BusEvent::RouteChange {
                bus,
                new_route: route,
            },
        }
    }
}

pub async fn handle(service: &Service, command: NotifyCommand) -> Result<Outcome> {
    let event = command.into_event();
    let category = event.category();
    service
        .catalogue()
        .dispatch(event)
        .await
        .with_context(|| format!("failed to send {} notification", category))
}
