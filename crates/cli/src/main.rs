// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bn - bus notification CLI

mod adapters;
mod commands;
mod error;
mod output;

use crate::adapters::Service;
use crate::error::CliError;
use crate::output::{report_outcome, OutputFormat};
use anyhow::{Context, Result};
use bn_core::PushToken;
use clap::{Parser, Subcommand};
use commands::{demo, notify, remind};
use std::path::PathBuf;
use std::process::ExitCode;

/// Environment variable holding the log filter
const LOG_ENV: &str = "BN_LOG";

#[derive(Parser)]
#[command(name = "bn", version, about = "Bus tracking notifications")]
struct Cli {
    /// Config file (defaults to $BN_CONFIG, then the per-user config)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print notification payloads as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the channel and request permission
    Setup,
    /// Send one bus notification
    #[command(subcommand)]
    Notify(notify::NotifyCommand),
    /// Send the test notification
    Test,
    /// Schedule the daily reminder
    Remind(remind::RemindArgs),
    /// Replay a simulated trip
    Demo(demo::DemoArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", CliError::from_anyhow(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = adapters::load_config(cli.config.as_deref())?;
    let format = OutputFormat::from_json_flag(cli.json);

    let service = adapters::make_service(&config);
    service
        .listeners()
        .on_received(move |n| println!("{}", output::format_notification(n, format)));
    let bridge = service.attach_listeners();

    let result = execute(&service, cli.command, format).await;

    // The tray stream closes once every platform handle is gone
    drop(service);
    let _ = bridge.await;
    result
}

async fn execute(service: &Service, command: Commands, format: OutputFormat) -> Result<()> {
    let token = service
        .setup_notifications()
        .await
        .context("notification setup failed")?;

    match command {
        Commands::Setup => print_setup(service, token.as_ref(), format),
        Commands::Notify(command) => {
            let outcome = notify::handle(service, command).await?;
            report_outcome(&outcome);
        }
        Commands::Test => {
            let outcome = service
                .test_notification()
                .await
                .context("failed to send the test notification")?;
            report_outcome(&outcome);
        }
        Commands::Remind(args) => remind::handle(service, args).await?,
        Commands::Demo(args) => demo::handle(service, args).await?,
    }
    Ok(())
}

fn print_setup(service: &Service, token: Option<&PushToken>, format: OutputFormat) {
    let permission = service.permission_state();
    match format {
        OutputFormat::Text => {
            println!("permission: {}", permission);
            if let Some(token) = token {
                println!("push token: {}", token);
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "permission": permission.to_string(),
                "token": token.map(PushToken::as_str),
            });
            println!("{}", value);
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
