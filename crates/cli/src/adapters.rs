// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service factory and config lookup for CLI commands

use anyhow::{Context, Result};
use bn_adapters::{ConsoleAdvisorySink, LocalPlatform, TracedPlatform};
use bn_core::{NotifyConfig, SystemClock};
use bn_engine::{NotificationService, ServiceDeps};
use std::path::{Path, PathBuf};

pub type Service =
    NotificationService<TracedPlatform<LocalPlatform>, ConsoleAdvisorySink, SystemClock>;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "BN_CONFIG";

/// Resolve and load the configuration.
///
/// An explicit `--config` or `$BN_CONFIG` must exist; the per-user file is
/// optional and falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<NotifyConfig> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
        return NotifyConfig::load(&path)
            .with_context(|| format!("cannot load config {}", path.display()));
    }

    let Some(path) = default_config_path() else {
        return Ok(NotifyConfig::default());
    };
    NotifyConfig::load_or_default(&path)
        .with_context(|| format!("cannot load config {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bn").join("config.toml"))
}

/// Create the production service over the in-process tray
pub fn make_service(config: &NotifyConfig) -> Service {
    let platform = LocalPlatform::new(config.device, config.consent.mode);
    let deps = ServiceDeps {
        platform: TracedPlatform::new(platform),
        advisories: ConsoleAdvisorySink,
    };
    NotificationService::new(deps, SystemClock, config)
}
