//! Guardia de duplicados
//!
//! Se ejecuta antes de cada inserción. Un duplicado se reporta como
//! `AppError::Duplicate` (409), distinto de un error de validación, para que
//! el llamador decida si lo trata como éxito idempotente.
//! Las observaciones son la excepción: se reutiliza la fila existente.

use chrono::NaiveDate;
use log::{debug, info};
use sqlx::SqliteConnection;

use crate::models::maintenance_type::NewMaintenanceType;
use crate::models::observation::ObservationOutcome;
use crate::repositories::{
    MaintenanceRecordRepository, MaintenanceTypeRepository, MechanicRepository,
    ObservationRepository,
};
use crate::utils::errors::{duplicate_error, AppResult};

pub struct DuplicateGuard;

impl DuplicateGuard {
    /// Rechaza una definición con la misma (configuración, nombre, categoría,
    /// intervalos), donde NULL iguala a NULL
    pub async fn check_maintenance_type(
        conn: &mut SqliteConnection,
        candidate: &NewMaintenanceType,
    ) -> AppResult<()> {
        if let Some(existing_id) = MaintenanceTypeRepository::find_duplicate(conn, candidate).await? {
            return Err(duplicate_error(
                "Maintenance type",
                &format!(
                    "'{}' ({}) for configuration {} is already defined with id {}",
                    candidate.name, candidate.category, candidate.configuration_id, existing_id
                ),
            ));
        }
        Ok(())
    }

    /// Devuelve la observación existente o inserta una nueva
    pub async fn register_observation(
        conn: &mut SqliteConnection,
        vehicle_id: i64,
        observed_on: NaiveDate,
        reading: i64,
    ) -> AppResult<ObservationOutcome> {
        if let Some(id) = ObservationRepository::find(conn, vehicle_id, observed_on, reading).await? {
            debug!("♻️ Reusing observation {} ({} @ {})", id, observed_on, reading);
            return Ok(ObservationOutcome::Reused(id));
        }

        let id = ObservationRepository::create(conn, vehicle_id, observed_on, reading).await?;
        info!("📍 Observation {} created for vehicle {}", id, vehicle_id);
        Ok(ObservationOutcome::Created(id))
    }

    pub async fn check_record(
        conn: &mut SqliteConnection,
        vehicle_id: i64,
        maintenance_type_id: i64,
        observation_id: i64,
    ) -> AppResult<()> {
        let existing = MaintenanceRecordRepository::find_duplicate(
            conn,
            vehicle_id,
            maintenance_type_id,
            observation_id,
        )
        .await?;

        match existing {
            Some(id) => Err(duplicate_error(
                "Maintenance record",
                &format!(
                    "type {} was already logged for this date and reading (record {})",
                    maintenance_type_id, id
                ),
            )),
            None => Ok(()),
        }
    }

    pub async fn check_mechanic(conn: &mut SqliteConnection, name: &str, phone: &str) -> AppResult<()> {
        if let Some(id) = MechanicRepository::find_by_identity(conn, name, phone).await? {
            return Err(duplicate_error(
                "Mechanic",
                &format!("{} / {} (id {})", name, phone, id),
            ));
        }
        Ok(())
    }
}
