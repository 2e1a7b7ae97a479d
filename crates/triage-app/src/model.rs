// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Locale, Priority, TicketId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub priority: Priority,
    pub created_at: OffsetDateTime,
    pub description: String,
    pub assigned_to: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        let strings = locale.strings();
        match self {
            Self::Newest => strings.newest,
            Self::Oldest => strings.oldest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssigneeFilter {
    #[default]
    All,
    Named(String),
}

impl AssigneeFilter {
    pub fn matches(&self, assigned_to: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == assigned_to,
        }
    }

    pub fn label(&self, locale: Locale) -> &str {
        match self {
            Self::All => locale.strings().all,
            Self::Named(name) => name,
        }
    }
}
