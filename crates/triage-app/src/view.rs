// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Reverse;

use crate::{AssigneeFilter, Priority, PriorityFilter, Selection, SortOrder, Ticket};

/// Everything the user can change about the dashboard. Replaced as a whole
/// on every interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewSelection {
    pub priority_filter: PriorityFilter,
    pub sort_order: SortOrder,
    pub assignee_filter: AssigneeFilter,
    pub selection: Selection,
}

/// Filter by priority, then stable-sort by creation date.
pub fn derive(
    tickets: &[Ticket],
    priority_filter: PriorityFilter,
    sort_order: SortOrder,
) -> Vec<&Ticket> {
    let filtered = tickets
        .iter()
        .filter(|ticket| priority_filter.matches(ticket.priority))
        .collect();
    sort_by_created(filtered, sort_order)
}

/// [`derive`] with the assignee predicate applied as well.
pub fn derive_with_assignee<'a>(tickets: &'a [Ticket], view: &ViewSelection) -> Vec<&'a Ticket> {
    let filtered = tickets
        .iter()
        .filter(|ticket| view.priority_filter.matches(ticket.priority))
        .filter(|ticket| view.assignee_filter.matches(&ticket.assigned_to))
        .collect();
    sort_by_created(filtered, view.sort_order)
}

fn sort_by_created(mut tickets: Vec<&Ticket>, sort_order: SortOrder) -> Vec<&Ticket> {
    // sort_by_key is stable; Reverse keeps ties in store order for newest-first.
    match sort_order {
        SortOrder::Newest => tickets.sort_by_key(|ticket| Reverse(ticket.created_at)),
        SortOrder::Oldest => tickets.sort_by_key(|ticket| ticket.created_at),
    }
    tickets
}

/// One bucket per priority, indexed by [`Priority::rank`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriorityGroups<'a> {
    buckets: [Vec<&'a Ticket>; 4],
}

impl<'a> PriorityGroups<'a> {
    pub fn bucket(&self, priority: Priority) -> &[&'a Ticket] {
        &self.buckets[priority.rank()]
    }

    /// True when no bucket holds a ticket.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Every priority in display order, including empty buckets.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &[&'a Ticket])> + '_ {
        Priority::ALL
            .into_iter()
            .map(move |priority| (priority, self.bucket(priority)))
    }

    /// Only the groups that have something to render.
    pub fn non_empty(&self) -> impl Iterator<Item = (Priority, &[&'a Ticket])> + '_ {
        self.iter().filter(|(_, tickets)| !tickets.is_empty())
    }

    /// Display order: groups by priority, each in sort order.
    pub fn flatten(&self) -> Vec<&'a Ticket> {
        self.buckets.iter().flatten().copied().collect()
    }
}

pub fn group_by_priority<'a>(sorted: &[&'a Ticket]) -> PriorityGroups<'a> {
    let mut groups = PriorityGroups::default();
    for ticket in sorted {
        groups.buckets[ticket.priority.rank()].push(*ticket);
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketView<'a> {
    pub sorted: Vec<&'a Ticket>,
    pub groups: PriorityGroups<'a>,
}

impl<'a> TicketView<'a> {
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn display_order(&self) -> Vec<&'a Ticket> {
        self.groups.flatten()
    }
}

pub fn derive_view<'a>(tickets: &'a [Ticket], view: &ViewSelection) -> TicketView<'a> {
    let sorted = derive_with_assignee(tickets, view);
    let groups = group_by_priority(&sorted);
    TicketView { sorted, groups }
}

/// Distinct assignee names in first-seen store order.
pub fn assignees(tickets: &[Ticket]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for ticket in tickets {
        if !names.contains(&ticket.assigned_to.as_str()) {
            names.push(&ticket.assigned_to);
        }
    }
    names
}
