// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;
use time::OffsetDateTime;

use crate::TicketId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    #[error("unknown priority {0:?}; expected one of: critical, high, medium, low")]
    UnknownPriority(String),

    #[error("ticket #{0} not found")]
    TicketNotFound(TicketId),

    #[error("creation date {date} is after the reference time {now}")]
    InvalidTimestamp {
        date: OffsetDateTime,
        now: OffsetDateTime,
    },
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
