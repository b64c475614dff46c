//! Modelo de registro de mantenimiento
//!
//! El registro es la única entidad calculada: `next_due_date` y
//! `next_due_reading` se derivan al crearlo y nunca se recalculan.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::maintenance_type::MaintenanceCategory;

/// Registro de mantenimiento - mapea a la tabla maintenance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub vehicle_id: i64,
    pub maintenance_type_id: i64,
    pub observation_id: i64,
    pub mechanic_id: i64,
    pub price: f64,
    pub next_due_date: Option<NaiveDate>,
    pub next_due_reading: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fila del historial de un vehículo (JOIN con tipo, observación y mecánico)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MaintenanceHistoryEntry {
    pub id: i64,
    pub maintenance_type_id: i64,
    pub maintenance_type: String,
    pub category: MaintenanceCategory,
    pub observed_on: NaiveDate,
    pub reading: i64,
    pub mechanic_name: String,
    pub price: f64,
    pub next_due_date: Option<NaiveDate>,
    pub next_due_reading: Option<i64>,
    pub notes: Option<String>,
}

/// Próximo vencimiento por tipo de mantenimiento
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpcomingMaintenance {
    pub maintenance_type_id: i64,
    pub maintenance_type: String,
    pub category: MaintenanceCategory,
    pub last_service_on: NaiveDate,
    pub next_due_date: Option<NaiveDate>,
    pub next_due_reading: Option<i64>,
    pub overdue: bool,
}
