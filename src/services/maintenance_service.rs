//! Registro de mantenimientos
//!
//! Flujo de creación: validación de entrada (sin tocar la base) → una sola
//! transacción con vehículo, tipo, mecánico, observación, guardia de
//! duplicados, cálculo de vencimientos e inserción. Cualquier fallo descarta
//! la transacción completa, incluida una observación recién creada.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::dto::maintenance_dto::CreateMaintenanceRecordRequest;
use crate::models::maintenance_record::{
    MaintenanceHistoryEntry, MaintenanceRecord, UpcomingMaintenance,
};
use crate::models::observation::ObservationOutcome;
use crate::repositories::{
    MaintenanceRecordRepository, MaintenanceTypeRepository, MechanicRepository,
    NewMaintenanceRecord, ObservationRepository, VehicleRepository,
};
use crate::services::due_calculator::predict_for_definition;
use crate::services::duplicate_guard::DuplicateGuard;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::validation::{parse_price, validate_date, validate_non_negative};

/// Entrada ya validada, lista para la transacción
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecordInput {
    pub vehicle_id: i64,
    pub maintenance_type_id: i64,
    pub mechanic_id: i64,
    pub observed_on: NaiveDate,
    pub reading: i64,
    pub price: f64,
    pub notes: Option<String>,
}

/// Validación previa a cualquier acceso a la base
pub fn validate_record_input(
    request: &CreateMaintenanceRecordRequest,
) -> AppResult<ValidatedRecordInput> {
    let price = parse_price(&request.price)?;
    let observed_on = validate_date(&request.date)
        .map_err(|_| validation_error("date", "Date must use the YYYY-MM-DD format"))?;
    validate_non_negative(request.reading)
        .map_err(|_| validation_error("reading", "Odometer reading cannot be negative"))?;

    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(ValidatedRecordInput {
        vehicle_id: request.vehicle_id,
        maintenance_type_id: request.maintenance_type_id,
        mechanic_id: request.mechanic_id,
        observed_on,
        reading: request.reading,
        price,
        notes,
    })
}

/// Último registro por tipo → próximo vencimiento.
///
/// `entries` debe venir del más reciente al más antiguo. Los tipos cuyo último
/// registro no tiene vencimiento calculado se omiten.
pub fn summarize_upcoming(
    entries: &[MaintenanceHistoryEntry],
    latest_reading: Option<i64>,
    today: NaiveDate,
) -> Vec<UpcomingMaintenance> {
    let mut seen = HashSet::new();
    let mut upcoming: Vec<UpcomingMaintenance> = entries
        .iter()
        .filter(|entry| seen.insert(entry.maintenance_type_id))
        .filter(|entry| entry.next_due_date.is_some() || entry.next_due_reading.is_some())
        .map(|entry| {
            let date_overdue = entry.next_due_date.map_or(false, |due| due < today);
            let reading_overdue = match (entry.next_due_reading, latest_reading) {
                (Some(due), Some(current)) => due <= current,
                _ => false,
            };

            UpcomingMaintenance {
                maintenance_type_id: entry.maintenance_type_id,
                maintenance_type: entry.maintenance_type.clone(),
                category: entry.category,
                last_service_on: entry.observed_on,
                next_due_date: entry.next_due_date,
                next_due_reading: entry.next_due_reading,
                overdue: date_overdue || reading_overdue,
            }
        })
        .collect();

    // vencidos primero, luego por fecha (sin fecha al final)
    upcoming.sort_by(|a, b| {
        b.overdue
            .cmp(&a.overdue)
            .then_with(|| match (a.next_due_date, b.next_due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| a.maintenance_type.cmp(&b.maintenance_type))
    });

    upcoming
}

pub struct MaintenanceService;

impl MaintenanceService {
    pub async fn create_record(
        pool: &SqlitePool,
        request: &CreateMaintenanceRecordRequest,
    ) -> AppResult<(MaintenanceRecord, ObservationOutcome)> {
        let input = validate_record_input(request)?;

        let mut tx = pool.begin().await?;

        let vehicle = VehicleRepository::find_by_id(&mut tx, input.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Vehicle {} does not exist", input.vehicle_id))
            })?;

        let definition = MaintenanceTypeRepository::find_by_id(&mut tx, input.maintenance_type_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Maintenance type {} does not exist",
                    input.maintenance_type_id
                ))
            })?;

        if definition.configuration_id != vehicle.configuration_id {
            return Err(AppError::BadRequest(format!(
                "Maintenance type '{}' does not apply to vehicle '{}'",
                definition.name, vehicle.alias
            )));
        }

        if MechanicRepository::find_by_id(&mut tx, input.mechanic_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Mechanic {} does not exist",
                input.mechanic_id
            )));
        }

        let observation = DuplicateGuard::register_observation(
            &mut tx,
            input.vehicle_id,
            input.observed_on,
            input.reading,
        )
        .await?;

        DuplicateGuard::check_record(&mut tx, input.vehicle_id, definition.id, observation.id())
            .await?;

        let due = predict_for_definition(&definition, input.observed_on, input.reading);

        let record = MaintenanceRecordRepository::create(
            &mut tx,
            NewMaintenanceRecord {
                vehicle_id: input.vehicle_id,
                maintenance_type_id: definition.id,
                observation_id: observation.id(),
                mechanic_id: input.mechanic_id,
                price: input.price,
                next_due_date: due.next_due_date,
                next_due_reading: due.next_due_reading,
                notes: input.notes,
            },
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "🔧 Maintenance record {} created: vehicle {} / type {} (next due: {:?} / {:?})",
            record.id,
            record.vehicle_id,
            record.maintenance_type_id,
            record.next_due_date,
            record.next_due_reading
        );

        Ok((record, observation))
    }

    pub async fn history(
        pool: &SqlitePool,
        vehicle_id: i64,
    ) -> AppResult<Vec<MaintenanceHistoryEntry>> {
        let mut conn = pool.acquire().await?;

        if VehicleRepository::find_by_id(&mut conn, vehicle_id).await?.is_none() {
            return Err(not_found_error("Vehicle", vehicle_id));
        }

        MaintenanceRecordRepository::history(&mut conn, vehicle_id).await
    }

    pub async fn upcoming(
        pool: &SqlitePool,
        vehicle_id: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<UpcomingMaintenance>> {
        let mut conn = pool.acquire().await?;

        if VehicleRepository::find_by_id(&mut conn, vehicle_id).await?.is_none() {
            return Err(not_found_error("Vehicle", vehicle_id));
        }

        let entries = MaintenanceRecordRepository::history(&mut conn, vehicle_id).await?;
        let latest_reading = ObservationRepository::latest_reading(&mut conn, vehicle_id).await?;

        Ok(summarize_upcoming(&entries, latest_reading, today))
    }
}
