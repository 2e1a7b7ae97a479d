// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::PathBuf;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use triage_app::{Priority, Ticket, TicketId};

const TITLES: [&str; 12] = [
    "Error en el sistema de pagos",
    "Actualizar documentación de API",
    "Bug en dashboard de analytics",
    "Mejorar rendimiento de búsqueda",
    "Error de autenticación en móvil",
    "Añadir exportación a Excel",
    "Optimizar imágenes del sitio",
    "Error en notificaciones push",
    "Timeout en el servicio de facturas",
    "Revisar permisos de administrador",
    "Caché de sesiones inconsistente",
    "Migrar cola de correos",
];

const ASSIGNEES: [&str; 6] = [
    "Laura Carbajal",
    "María García",
    "Carlos López",
    "Ana Martínez",
    "Luis Rodríguez",
    "Sofia Torres",
];

const STATUSES: [&str; 4] = ["Nuevo", "Pendiente", "En progreso", "En revisión"];

/// Reference "now" used across tests: the day after the newest seed ticket.
pub fn fixed_now() -> OffsetDateTime {
    datetime!(2025-10-24 12:00 UTC)
}

pub fn midnight(year: i32, month: u8, day: u8) -> Result<OffsetDateTime> {
    let month = time::Month::try_from(month).context("valid month")?;
    let date = time::Date::from_calendar_date(year, month, day).context("valid calendar date")?;
    Ok(date.midnight().assume_utc())
}

#[derive(Debug, Clone)]
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            ticket: Ticket {
                id: TicketId::new(id),
                title: format!("Ticket {id}"),
                priority: Priority::Medium,
                created_at: fixed_now(),
                description: String::new(),
                assigned_to: ASSIGNEES[0].to_owned(),
                status: STATUSES[0].to_owned(),
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.ticket.title = title.to_owned();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.ticket.priority = priority;
        self
    }

    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.ticket.created_at = created_at;
        self
    }

    pub fn days_before_now(self, days: i64) -> Self {
        self.created_at(fixed_now() - Duration::days(days))
    }

    pub fn assigned_to(mut self, name: &str) -> Self {
        self.ticket.assigned_to = name.to_owned();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.ticket.status = status.to_owned();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.ticket.description = description.to_owned();
        self
    }

    pub fn build(self) -> Ticket {
        self.ticket
    }
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Reproducible ticket lists for pipeline tests. Dates are drawn from a
/// narrow window so that ties are common.
#[derive(Debug, Clone)]
pub struct TicketFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl TicketFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn ticket(&mut self) -> Ticket {
        let id = self.next_id;
        self.next_id += 1;
        let days_back = self.rng.int_n(10) as i64;
        TicketBuilder::new(id)
            .title(self.pick(&TITLES))
            .priority(Priority::ALL[self.rng.int_n(Priority::ALL.len())])
            .days_before_now(days_back)
            .assigned_to(self.pick(&ASSIGNEES))
            .status(self.pick(&STATUSES))
            .build()
    }

    pub fn tickets(&mut self, count: usize) -> Vec<Ticket> {
        (0..count).map(|_| self.ticket()).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn temp_tickets_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("tickets.json");
    Ok((dir, path))
}

pub fn assignees() -> &'static [&'static str] {
    &ASSIGNEES
}

#[cfg(test)]
mod tests {
    use super::{TicketBuilder, TicketFaker, fixed_now, midnight};
    use anyhow::Result;
    use time::Duration;
    use triage_app::Priority;

    #[test]
    fn faker_is_deterministic_per_seed() {
        let first = TicketFaker::new(7).tickets(20);
        let second = TicketFaker::new(7).tickets(20);
        assert_eq!(first, second);
        assert_ne!(first, TicketFaker::new(8).tickets(20));
    }

    #[test]
    fn faker_ids_are_sequential_and_dates_not_in_future() {
        let tickets = TicketFaker::new(3).tickets(15);
        for (index, ticket) in tickets.iter().enumerate() {
            assert_eq!(ticket.id.get(), index as i64 + 1);
            assert!(ticket.created_at <= fixed_now());
        }
    }

    #[test]
    fn builder_overrides_fields() {
        let ticket = TicketBuilder::new(4)
            .priority(Priority::Low)
            .days_before_now(2)
            .assigned_to("Ana Martínez")
            .build();
        assert_eq!(ticket.priority, Priority::Low);
        assert_eq!(ticket.created_at, fixed_now() - Duration::days(2));
        assert_eq!(ticket.assigned_to, "Ana Martínez");
    }

    #[test]
    fn midnight_rejects_invalid_dates() -> Result<()> {
        assert!(midnight(2025, 2, 30).is_err());
        assert_eq!(midnight(2025, 10, 20)?.hour(), 0);
        Ok(())
    }
}
