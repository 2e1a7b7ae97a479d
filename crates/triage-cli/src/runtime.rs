// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;
use triage_app::Ticket;
use triage_store::TicketStore;

/// Serves a loaded store to the dashboard. The clock is the wall clock
/// unless a fixed instant was requested.
pub struct StoreRuntime<'a> {
    store: &'a TicketStore,
    fixed_now: Option<OffsetDateTime>,
}

impl<'a> StoreRuntime<'a> {
    pub fn new(store: &'a TicketStore, fixed_now: Option<OffsetDateTime>) -> Self {
        Self { store, fixed_now }
    }
}

impl triage_tui::AppRuntime for StoreRuntime<'_> {
    fn tickets(&self) -> &[Ticket] {
        self.store.tickets()
    }

    fn now(&self) -> OffsetDateTime {
        self.fixed_now.unwrap_or_else(OffsetDateTime::now_utc)
    }
}
