// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use triage_app::{Locale, PriorityFilter, SortOrder};

pub const APP_NAME: &str = "triage";
pub const CONFIG_PATH_ENV: &str = "TRIAGE_CONFIG_PATH";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            ui: Ui::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub tickets_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub locale: Option<String>,
    pub default_sort: Option<String>,
    pub default_priority: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            locale: Some(Locale::default().as_str().to_owned()),
            default_sort: Some(SortOrder::default().as_str().to_owned()),
            default_priority: Some(PriorityFilter::default().as_str().to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [data], [ui], and [logging]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `triage --print-example-config` for the current schema",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(locale) = &self.ui.locale
            && Locale::parse(locale).is_none()
        {
            bail!(
                "ui.locale in {} must be one of es, en; got {locale:?}",
                path.display()
            );
        }

        if let Some(sort) = &self.ui.default_sort
            && SortOrder::parse(sort).is_none()
        {
            bail!(
                "ui.default_sort in {} must be newest or oldest; got {sort:?}",
                path.display()
            );
        }

        if let Some(priority) = &self.ui.default_priority {
            PriorityFilter::parse(priority).with_context(|| {
                format!(
                    "ui.default_priority in {} must be all, critical, high, medium, or low",
                    path.display()
                )
            })?;
        }

        if let Some(tickets_path) = &self.data.tickets_path
            && tickets_path.trim().is_empty()
        {
            bail!(
                "data.tickets_path in {} is empty; remove it to use the built-in tickets",
                path.display()
            );
        }

        if let Some(level) = &self.logging.level
            && level.trim().is_empty()
        {
            bail!("logging.level in {} must not be empty", path.display());
        }

        Ok(())
    }

    pub fn tickets_path(&self) -> Option<PathBuf> {
        self.data.tickets_path.as_deref().map(PathBuf::from)
    }

    pub fn locale(&self) -> Locale {
        self.ui
            .locale
            .as_deref()
            .and_then(Locale::parse)
            .unwrap_or_default()
    }

    pub fn default_sort(&self) -> SortOrder {
        self.ui
            .default_sort
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or_default()
    }

    pub fn default_priority(&self) -> PriorityFilter {
        self.ui
            .default_priority
            .as_deref()
            .and_then(|value| PriorityFilter::parse(value).ok())
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.logging.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [logging].file in the config")
        })?;
        Ok(data_root.join(APP_NAME).join("triage.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# triage config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. JSON array of tickets; the built-in tickets are used when unset.\n# tickets_path = \"/absolute/path/to/tickets.json\"\n\n[ui]\nlocale = \"{}\"            # es | en\ndefault_sort = \"{}\"  # newest | oldest\ndefault_priority = \"{}\" # all | critical | high | medium | low\n\n[logging]\n# Overridden by the TRIAGE_LOG environment variable.\nlevel = \"{}\"\n# file = \"/absolute/path/to/triage.log\"\n",
            path.display(),
            Locale::default().as_str(),
            SortOrder::default().as_str(),
            PriorityFilter::default().as_str(),
            DEFAULT_LOG_LEVEL,
        )
    }
}
