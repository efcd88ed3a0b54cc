// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

pub const GRANT: &str = "[consent]\nmode = \"grant\"\n";
pub const DENY: &str = "[consent]\nmode = \"deny\"\n";
pub const ASK: &str = "[consent]\nmode = \"ask\"\n";
pub const EMULATOR: &str = "[device]\nplatform = \"android\"\nphysical = false\n";

/// Write `config` into a fresh temp dir.
/// Returns the dir (cleaned up on drop) and a `bn` command pointed at it.
pub fn bn_with_config(config: &str) -> (TempDir, Command) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = temp.path().join("config.toml");
    fs::write(&path, config).expect("Failed to write config");

    let mut cmd = Command::cargo_bin("bn").expect("bn binary");
    cmd.arg("--config")
        .arg(&path)
        .env_remove("BN_LOG")
        .env_remove("BN_CONFIG");
    (temp, cmd)
}
