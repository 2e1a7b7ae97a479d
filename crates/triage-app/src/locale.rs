// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// Language used for every user-visible string. Never affects derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::Es, Self::En];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub const fn strings(self) -> &'static UiStrings {
        match self {
            Self::Es => &ES,
            Self::En => &EN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStrings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub filters: &'static str,
    pub all: &'static str,
    pub sort: &'static str,
    pub newest: &'static str,
    pub oldest: &'static str,
    pub assignee: &'static str,
    pub today: &'static str,
    pub yesterday: &'static str,
    pub days_ago_prefix: &'static str,
    pub days_ago_suffix: &'static str,
    pub empty_state: &'static str,
    pub detail_placeholder: &'static str,
    pub heading_priority: &'static str,
    pub heading_created: &'static str,
    pub heading_status: &'static str,
    pub heading_assignee: &'static str,
    pub heading_description: &'static str,
    pub heading_id: &'static str,
}

impl UiStrings {
    pub fn days_ago(&self, days: i64) -> String {
        format!("{}{days}{}", self.days_ago_prefix, self.days_ago_suffix)
    }
}

const ES: UiStrings = UiStrings {
    title: "Sistema de Tickets",
    subtitle: "Gestiona y organiza tus tickets por prioridad",
    filters: "Filtros",
    all: "Todas",
    sort: "Ordenar",
    newest: "Más recientes",
    oldest: "Más antiguos",
    assignee: "Colaborador",
    today: "Hoy",
    yesterday: "Ayer",
    days_ago_prefix: "Hace ",
    days_ago_suffix: " días",
    empty_state: "No hay tickets con los filtros seleccionados",
    detail_placeholder: "Selecciona un ticket para ver sus detalles",
    heading_priority: "Prioridad",
    heading_created: "Fecha de creación",
    heading_status: "Estado",
    heading_assignee: "Asignado a",
    heading_description: "Descripción",
    heading_id: "ID del Ticket",
};

const EN: UiStrings = UiStrings {
    title: "Ticket System",
    subtitle: "Manage and organize your tickets by priority",
    filters: "Filters",
    all: "All",
    sort: "Sort",
    newest: "Newest first",
    oldest: "Oldest first",
    assignee: "Assignee",
    today: "today",
    yesterday: "yesterday",
    days_ago_prefix: "",
    days_ago_suffix: " days ago",
    empty_state: "No tickets match the selected filters",
    detail_placeholder: "Select a ticket to see its details",
    heading_priority: "Priority",
    heading_created: "Created",
    heading_status: "Status",
    heading_assignee: "Assigned to",
    heading_description: "Description",
    heading_id: "Ticket ID",
};
