// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Commands return `anyhow::Result`; `main` renders the final error through
//! [`CliError`], which adds:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use bn_adapters::PlatformError;
use bn_core::ConfigError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl CliError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Build the display form of an error chain.
    ///
    /// The outermost context becomes the message, every cause a context line.
    /// Config and platform failures get suggestions.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let mut cli = CliError::new(err.to_string());
        for cause in err.chain().skip(1) {
            cli = cli.with_context(cause.to_string());
        }

        if let Some(config) = err.downcast_ref::<ConfigError>() {
            cli = cli.config_suggestions(config);
        } else if let Some(platform) = err.downcast_ref::<PlatformError>() {
            cli = cli.platform_suggestions(platform);
        }
        cli
    }

    fn config_suggestions(self, err: &ConfigError) -> Self {
        match err {
            ConfigError::Read { .. } => self
                .with_suggestion("Check the path passed to --config or $BN_CONFIG")
                .with_suggestion("Omit --config to run with built-in defaults"),
            ConfigError::Parse(_) => self
                .with_suggestion("Durations look like cooldown = \"60s\"")
                .with_suggestion("consent.mode is one of: grant, deny, ask"),
        }
    }

    fn platform_suggestions(self, err: &PlatformError) -> Self {
        match err {
            PlatformError::Consent(_) | PlatformError::Io(_) => self
                .with_context("The consent prompt could not read an answer")
                .with_suggestion("Set [consent] mode = \"grant\" or \"deny\" in the config"),
            _ => self.with_suggestion("Re-run with BN_LOG=debug for platform traces"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}
