// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{Locale, TriageError, TriageResult};

/// Severity levels, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Position in [`Priority::ALL`].
    pub const fn rank(self) -> usize {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Es, Self::Critical) => "Crítica",
            (Locale::Es, Self::High) => "Alta",
            (Locale::Es, Self::Medium) => "Media",
            (Locale::Es, Self::Low) => "Baja",
            (Locale::En, Self::Critical) => "Critical",
            (Locale::En, Self::High) => "High",
            (Locale::En, Self::Medium) => "Medium",
            (Locale::En, Self::Low) => "Low",
        }
    }

    pub const fn severity(self) -> SeverityColor {
        match self {
            Self::Critical => SeverityColor::Red,
            Self::High => SeverityColor::Orange,
            Self::Medium => SeverityColor::Yellow,
            Self::Low => SeverityColor::Blue,
        }
    }

    pub const fn info(self, locale: Locale) -> PriorityInfo {
        PriorityInfo {
            priority: self,
            key: self.as_str(),
            label: self.label(locale),
            severity: self.severity(),
        }
    }
}

/// Display tag only; never consulted by filtering or sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityColor {
    Red,
    Orange,
    Yellow,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityInfo {
    pub priority: Priority,
    pub key: &'static str,
    pub label: &'static str,
    pub severity: SeverityColor,
}

pub fn lookup(key: &str, locale: Locale) -> TriageResult<PriorityInfo> {
    Priority::parse(key)
        .map(|priority| priority.info(locale))
        .ok_or_else(|| TriageError::UnknownPriority(key.to_owned()))
}

pub const fn ordered_keys() -> [Priority; 4] {
    Priority::ALL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// `all` followed by each priority in display order.
    pub const CHOICES: [Self; 5] = [
        Self::All,
        Self::Only(Priority::Critical),
        Self::Only(Priority::High),
        Self::Only(Priority::Medium),
        Self::Only(Priority::Low),
    ];

    pub fn parse(value: &str) -> TriageResult<Self> {
        if value == "all" {
            return Ok(Self::All);
        }
        Priority::parse(value)
            .map(Self::Only)
            .ok_or_else(|| TriageError::UnknownPriority(value.to_owned()))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(priority) => priority.as_str(),
        }
    }

    pub const fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.rank() == priority.rank(),
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match self {
            Self::All => locale.strings().all,
            Self::Only(priority) => priority.label(locale),
        }
    }
}
