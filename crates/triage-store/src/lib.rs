// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod validation;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use triage_app::{Priority, Ticket, TicketId, TriageError};

pub use validation::{DATE_LAYOUT, parse_created_at};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ticket id {0} must be a positive integer")]
    InvalidId(i64),

    #[error("ticket id {0} appears more than once")]
    DuplicateId(TicketId),

    #[error("ticket #{0} has an empty title")]
    EmptyTitle(TicketId),

    #[error("ticket #{id} has invalid created_at {value:?}; use YYYY-MM-DD or RFC 3339")]
    InvalidDate { id: TicketId, value: String },

    #[error("ticket #{id}: {source}")]
    UnknownPriority {
        id: TicketId,
        #[source]
        source: TriageError,
    },

    #[error("read ticket file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse ticket file {} as a JSON array of tickets", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw ticket as it arrives from seed data or a JSON file. Priority and date
/// are still strings here; [`TicketStore::from_records`] checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: i64,
    pub title: String,
    pub priority: String,
    #[serde(alias = "createdAt")]
    pub created_at: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "assignedTo")]
    pub assigned_to: String,
    #[serde(default)]
    pub status: String,
}

/// Immutable, validated set of tickets in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
}

impl TicketStore {
    pub fn from_records(records: Vec<TicketRecord>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut tickets = Vec::with_capacity(records.len());
        for record in records {
            let ticket = ticket_from_record(record).inspect_err(|error| {
                tracing::warn!("rejecting ticket data: {error}");
            })?;
            if !seen.insert(ticket.id) {
                tracing::warn!(ticket = ticket.id.get(), "duplicate ticket id");
                return Err(StoreError::DuplicateId(ticket.id));
            }
            tickets.push(ticket);
        }
        Ok(Self { tickets })
    }

    /// The built-in demo tickets.
    pub fn seed() -> Result<Self, StoreError> {
        let store = Self::from_records(seed_records())?;
        tracing::info!(tickets = store.len(), "loaded built-in tickets");
        Ok(store)
    }

    pub fn load_json(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<TicketRecord> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let store = Self::from_records(records)?;
        tracing::info!(
            tickets = store.len(),
            path = %path.display(),
            "loaded tickets from file"
        );
        Ok(store)
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    pub fn contains(&self, id: TicketId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

fn ticket_from_record(record: TicketRecord) -> Result<Ticket, StoreError> {
    if record.id <= 0 {
        return Err(StoreError::InvalidId(record.id));
    }
    let id = TicketId::new(record.id);
    if validation::is_blank(&record.title) {
        return Err(StoreError::EmptyTitle(id));
    }
    let priority = Priority::parse(&record.priority).ok_or_else(|| StoreError::UnknownPriority {
        id,
        source: TriageError::UnknownPriority(record.priority.clone()),
    })?;
    let created_at =
        parse_created_at(&record.created_at).ok_or_else(|| StoreError::InvalidDate {
            id,
            value: record.created_at.clone(),
        })?;

    Ok(Ticket {
        id,
        title: record.title,
        priority,
        created_at,
        description: record.description,
        assigned_to: record.assigned_to,
        status: record.status,
    })
}

const SEED: [(i64, &str, &str, &str, &str, &str, &str); 8] = [
    (
        1,
        "Error en el sistema de pagos",
        "critical",
        "2025-10-20",
        "Los usuarios no pueden procesar pagos con tarjeta de crédito. Error 500 en el gateway de pago.",
        "Laura Carbajal",
        "En progreso",
    ),
    (
        2,
        "Actualizar documentación de API",
        "low",
        "2025-10-15",
        "La documentación de la API v2 necesita actualizarse con los nuevos endpoints.",
        "María García",
        "Pendiente",
    ),
    (
        3,
        "Bug en dashboard de analytics",
        "high",
        "2025-10-22",
        "Las métricas de conversión no se están mostrando correctamente en el dashboard.",
        "Carlos López",
        "En progreso",
    ),
    (
        4,
        "Mejorar rendimiento de búsqueda",
        "medium",
        "2025-10-18",
        "La búsqueda de productos tarda más de 3 segundos en cargar resultados.",
        "Ana Martínez",
        "Pendiente",
    ),
    (
        5,
        "Error de autenticación en móvil",
        "critical",
        "2025-10-23",
        "Los usuarios de iOS no pueden iniciar sesión en la aplicación móvil.",
        "Luis Rodríguez",
        "Nuevo",
    ),
    (
        6,
        "Añadir exportación a Excel",
        "medium",
        "2025-10-10",
        "Los usuarios solicitan poder exportar reportes en formato Excel.",
        "Sofia Torres",
        "Pendiente",
    ),
    (
        7,
        "Optimizar imágenes del sitio",
        "low",
        "2025-10-05",
        "Las imágenes del sitio web están ralentizando la carga de páginas.",
        "Pedro Sánchez",
        "Pendiente",
    ),
    (
        8,
        "Error en notificaciones push",
        "high",
        "2025-10-21",
        "Las notificaciones push no se están enviando a usuarios de Android.",
        "Laura Fernández",
        "En revisión",
    ),
];

pub fn seed_records() -> Vec<TicketRecord> {
    SEED.iter()
        .map(
            |(id, title, priority, created_at, description, assigned_to, status)| TicketRecord {
                id: *id,
                title: (*title).to_owned(),
                priority: (*priority).to_owned(),
                created_at: (*created_at).to_owned(),
                description: (*description).to_owned(),
                assigned_to: (*assigned_to).to_owned(),
                status: (*status).to_owned(),
            },
        )
        .collect()
}
