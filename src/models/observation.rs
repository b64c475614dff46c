//! Modelo de observación (fecha + lectura del odómetro)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Observación - mapea a la tabla observations, única por (vehicle_id, observed_on, reading)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Observation {
    pub id: i64,
    pub vehicle_id: i64,
    pub observed_on: NaiveDate,
    pub reading: i64,
}

/// Resultado de registrar una observación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationOutcome {
    Created(i64),
    /// Ya existía una fila idéntica; se reutiliza su id
    Reused(i64),
}

impl ObservationOutcome {
    pub fn id(&self) -> i64 {
        match self {
            ObservationOutcome::Created(id) | ObservationOutcome::Reused(id) => *id,
        }
    }
}
