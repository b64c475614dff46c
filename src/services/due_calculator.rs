//! Cálculo del próximo mantenimiento
//!
//! Función pura: intervalo + observación → próxima fecha / próxima lectura.
//! Un intervalo ausente produce un vencimiento ausente, nunca un error.

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::models::maintenance_type::MaintenanceTypeDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct DuePrediction {
    pub next_due_date: Option<NaiveDate>,
    pub next_due_reading: Option<i64>,
}

impl DuePrediction {
    pub fn is_empty(&self) -> bool {
        self.next_due_date.is_none() && self.next_due_reading.is_none()
    }
}

/// Suma meses de calendario; si el día no existe en el mes destino se usa el último día válido
pub fn add_months_clipped(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let months = u32::try_from(months).ok()?;
    date.checked_add_months(Months::new(months))
}

/// Suma simple de enteros, sin conversión de unidades
pub fn add_miles(reading: i64, miles: i64) -> Option<i64> {
    reading.checked_add(miles)
}

pub fn predict_next_due(
    observed_on: NaiveDate,
    reading: i64,
    mile_interval: Option<i64>,
    month_interval: Option<i64>,
) -> DuePrediction {
    DuePrediction {
        next_due_date: month_interval.and_then(|m| add_months_clipped(observed_on, m)),
        next_due_reading: mile_interval.and_then(|k| add_miles(reading, k)),
    }
}

pub fn predict_for_definition(
    definition: &MaintenanceTypeDefinition,
    observed_on: NaiveDate,
    reading: i64,
) -> DuePrediction {
    predict_next_due(
        observed_on,
        reading,
        definition.mile_interval,
        definition.month_interval,
    )
}
