// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub const LOG_ENV: &str = "TRIAGE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Non-interactive commands log next to their output.
    Stderr,
    /// The dashboard owns the terminal, so logs go to a file.
    File(PathBuf),
}

/// `TRIAGE_LOG` wins over `[logging].level`.
fn filter_directive(env_value: Option<String>, config: &Config) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.log_level().to_owned())
}

pub fn init(config: &Config, target: LogTarget) -> Result<()> {
    let directive = filter_directive(env::var(LOG_ENV).ok(), config);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter {directive:?}; check {LOG_ENV} or [logging].level"))?;

    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|error| anyhow!("install log subscriber: {error}")),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|error| anyhow!("install log subscriber: {error}"))
        }
    }
}
