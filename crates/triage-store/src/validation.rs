// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";

/// Accepts a bare calendar date (taken as UTC midnight) or an RFC 3339
/// instant.
pub fn parse_created_at(input: &str) -> Option<OffsetDateTime> {
    let trimmed = input.trim();
    if let Ok(date) = Date::parse(trimmed, &format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }
    OffsetDateTime::parse(trimmed, &Rfc3339).ok()
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
