// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification configuration loaded from TOML
//!
//! Every key is optional:
//!
//! ```toml
//! project_id = "bus-tracker"
//! cooldown = "60s"
//!
//! [device]
//! platform = "android"
//! physical = true
//!
//! [consent]
//! mode = "grant"
//!
//! [channel]
//! id = "bus-updates"
//! name = "Bus Updates"
//! importance = "max"
//! vibration_pattern_ms = [0, 250, 250, 250]
//! light_color = "#FF231F7C"
//! ```

use crate::permission::{ChannelConfig, DeviceProfile};
use crate::throttle::DEFAULT_COOLDOWN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How the local platform answers a consent prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentMode {
    #[default]
    Grant,
    Deny,
    /// Ask on the terminal
    Ask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentConfig {
    pub mode: ConsentMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Project id handed to the platform when requesting a push token
    pub project_id: String,
    /// Minimum gap between two proximity alerts of the same category
    #[serde(with = "humantime_serde")]
    pub cooldown: Duration,
    pub device: DeviceProfile,
    pub consent: ConsentConfig,
    pub channel: ChannelConfig,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            project_id: "bus-tracker".to_string(),
            cooldown: DEFAULT_COOLDOWN,
            device: DeviceProfile::default(),
            consent: ConsentConfig::default(),
            channel: ChannelConfig::default(),
        }
    }
}

impl NotifyConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
