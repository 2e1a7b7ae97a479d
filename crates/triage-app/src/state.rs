// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    AssigneeFilter, Locale, PriorityFilter, Selection, SortOrder, Ticket, TicketId, ViewSelection,
    assignees,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub view: ViewSelection,
    pub locale: Locale,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SetPriorityFilter(PriorityFilter),
    ToggleSortOrder,
    SetSortOrder(SortOrder),
    CycleAssignee,
    SetAssigneeFilter(AssigneeFilter),
    SelectTicket(TicketId),
    CloseDetail,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    PriorityFilterChanged(PriorityFilter),
    SortOrderChanged(SortOrder),
    AssigneeFilterChanged(AssigneeFilter),
    SelectionChanged(Selection),
    StatusUpdated(String),
    StatusCleared,
}

/// The state that replaces the current one, and what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: AppState,
    pub events: Vec<AppEvent>,
}

impl AppState {
    pub fn dispatch(&self, tickets: &[Ticket], command: AppCommand) -> Transition {
        let mut next = self.clone();
        let events = match command {
            AppCommand::SetPriorityFilter(filter) => {
                next.view = ViewSelection {
                    priority_filter: filter,
                    ..self.view.clone()
                };
                vec![AppEvent::PriorityFilterChanged(filter)]
            }
            AppCommand::ToggleSortOrder => next.apply_sort(self.view.sort_order.toggled()),
            AppCommand::SetSortOrder(order) => next.apply_sort(order),
            AppCommand::CycleAssignee => {
                let filter = next_assignee(tickets, &self.view.assignee_filter);
                next.apply_assignee(filter)
            }
            AppCommand::SetAssigneeFilter(filter) => next.apply_assignee(filter),
            AppCommand::SelectTicket(id) => match self.view.selection.select(tickets, id) {
                Ok(selection) => {
                    next.view = ViewSelection {
                        selection,
                        ..self.view.clone()
                    };
                    vec![AppEvent::SelectionChanged(selection)]
                }
                Err(error) => {
                    tracing::warn!(ticket = id.get(), "selection ignored: {error}");
                    vec![next.set_status(&error.to_string())]
                }
            },
            AppCommand::CloseDetail => {
                if self.view.selection.is_open() {
                    let selection = self.view.selection.close();
                    next.view = ViewSelection {
                        selection,
                        ..self.view.clone()
                    };
                    vec![AppEvent::SelectionChanged(selection)]
                } else {
                    Vec::new()
                }
            }
            AppCommand::SetStatus(message) => vec![next.set_status(&message)],
            AppCommand::ClearStatus => {
                next.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        };
        Transition {
            state: next,
            events,
        }
    }

    fn apply_sort(&mut self, order: SortOrder) -> Vec<AppEvent> {
        self.view = ViewSelection {
            sort_order: order,
            ..self.view.clone()
        };
        vec![AppEvent::SortOrderChanged(order)]
    }

    fn apply_assignee(&mut self, filter: AssigneeFilter) -> Vec<AppEvent> {
        let label = format!(
            "{}: {}",
            self.locale.strings().assignee,
            filter.label(self.locale)
        );
        self.view = ViewSelection {
            assignee_filter: filter.clone(),
            ..self.view.clone()
        };
        vec![
            AppEvent::AssigneeFilterChanged(filter),
            self.set_status(&label),
        ]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

/// `All`, then each assignee in store order, then back to `All`.
fn next_assignee(tickets: &[Ticket], current: &AssigneeFilter) -> AssigneeFilter {
    let names = assignees(tickets);
    let next = match current {
        AssigneeFilter::All => names.first(),
        AssigneeFilter::Named(name) => names
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|index| names.get(index + 1)),
    };
    next.map_or(AssigneeFilter::All, |name| {
        AssigneeFilter::Named((*name).to_owned())
    })
}
