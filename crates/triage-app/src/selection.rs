// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{Ticket, TicketId, TriageError, TriageResult};

/// Which ticket, if any, is shown in the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Closed,
    Open(TicketId),
}

impl Selection {
    pub fn select(self, tickets: &[Ticket], id: TicketId) -> TriageResult<Self> {
        if tickets.iter().any(|ticket| ticket.id == id) {
            Ok(Self::Open(id))
        } else {
            Err(TriageError::TicketNotFound(id))
        }
    }

    pub const fn close(self) -> Self {
        Self::Closed
    }

    pub const fn ticket_id(self) -> Option<TicketId> {
        match self {
            Self::Closed => None,
            Self::Open(id) => Some(id),
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn selected_ticket(self, tickets: &[Ticket]) -> Option<&Ticket> {
        let id = self.ticket_id()?;
        tickets.iter().find(|ticket| ticket.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::{Priority, Ticket, TicketId, TriageError};
    use time::OffsetDateTime;

    fn tickets() -> Vec<Ticket> {
        (1..=6)
            .map(|id| Ticket {
                id: TicketId::new(id),
                title: format!("ticket {id}"),
                priority: Priority::Low,
                created_at: OffsetDateTime::UNIX_EPOCH,
                description: String::new(),
                assigned_to: "Ana".to_owned(),
                status: "Nuevo".to_owned(),
            })
            .collect()
    }

    #[test]
    fn starts_closed() {
        assert_eq!(Selection::default(), Selection::Closed);
        assert!(!Selection::default().is_open());
    }

    #[test]
    fn select_then_close_twice_ends_closed() -> anyhow::Result<()> {
        let tickets = tickets();
        let state = Selection::default().select(&tickets, TicketId::new(5))?;
        assert_eq!(state, Selection::Open(TicketId::new(5)));

        let state = state.close();
        assert_eq!(state, Selection::Closed);
        let state = state.close();
        assert_eq!(state, Selection::Closed);
        Ok(())
    }

    #[test]
    fn select_replaces_open_ticket() -> anyhow::Result<()> {
        let tickets = tickets();
        let state = Selection::Open(TicketId::new(1)).select(&tickets, TicketId::new(2))?;
        assert_eq!(state.ticket_id(), Some(TicketId::new(2)));
        Ok(())
    }

    #[test]
    fn select_unknown_ticket_fails() {
        let tickets = tickets();
        let error = Selection::Closed
            .select(&tickets, TicketId::new(99))
            .expect_err("ticket 99 does not exist");
        assert_eq!(error, TriageError::TicketNotFound(TicketId::new(99)));
    }

    #[test]
    fn selected_ticket_resolves_against_store() {
        let tickets = tickets();
        let open = Selection::Open(TicketId::new(3));
        assert_eq!(
            open.selected_ticket(&tickets).map(|t| t.title.as_str()),
            Some("ticket 3")
        );
        assert!(Selection::Closed.selected_ticket(&tickets).is_none());
    }
}
