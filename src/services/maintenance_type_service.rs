//! Alta de definiciones de tipo de mantenimiento (Interval Store)
//!
//! Antes de insertar se verifica la columna identidad de la tabla y, si hace
//! falta, se repara. La reparación usa la misma conexión y corre fuera de la
//! transacción de inserción.

use sqlx::{Connection, SqlitePool};

use crate::database::schema_repair::{ensure_maintenance_type_identity, HealOutcome};
use crate::dto::maintenance_type_dto::CreateMaintenanceTypeRequest;
use crate::models::maintenance_type::{
    MaintenanceCategory, MaintenanceTypeDefinition, NewMaintenanceType,
};
use crate::repositories::{MaintenanceTypeRepository, VehicleRepository};
use crate::services::category_classifier::translate_localized;
use crate::services::duplicate_guard::DuplicateGuard;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

/// Categoría exacta (sin distinguir mayúsculas) o su nombre en español
pub fn resolve_category(text: &str) -> AppResult<MaintenanceCategory> {
    text.parse::<MaintenanceCategory>()
        .ok()
        .or_else(|| translate_localized(text))
        .ok_or_else(|| {
            AppError::BadRequest(format!("Unknown maintenance category '{}'", text.trim()))
        })
}

/// Normaliza el candidato: nombre sin espacios sobrantes, distancia en millas
pub fn build_candidate(
    configuration_id: i64,
    request: &CreateMaintenanceTypeRequest,
) -> AppResult<NewMaintenanceType> {
    let category = resolve_category(&request.category)?;

    let mile_interval = request
        .mile_interval
        .map(|value| request.distance_unit.to_miles(value));
    if mile_interval == Some(0) {
        return Err(bad_request_error(
            "Mile interval is too small once converted to miles",
        ));
    }

    Ok(NewMaintenanceType {
        configuration_id,
        name: request.name.trim().to_string(),
        category,
        mile_interval,
        month_interval: request.month_interval,
    })
}

pub struct MaintenanceTypeService;

impl MaintenanceTypeService {
    pub async fn create_definition(
        pool: &SqlitePool,
        request: &CreateMaintenanceTypeRequest,
    ) -> AppResult<MaintenanceTypeDefinition> {
        let mut conn = pool.acquire().await?;

        let vehicle = VehicleRepository::find_by_id(&mut conn, request.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Vehicle {} does not exist", request.vehicle_id))
            })?;

        let candidate = build_candidate(vehicle.configuration_id, request)?;

        match ensure_maintenance_type_identity(&mut conn).await? {
            HealOutcome::AlreadyHealthy => {}
            outcome => log::info!("🛠️ maintenance_types repaired before insert: {:?}", outcome),
        }

        let mut tx = conn.begin().await?;
        DuplicateGuard::check_maintenance_type(&mut tx, &candidate).await?;
        let definition = MaintenanceTypeRepository::create(&mut tx, &candidate).await?;
        tx.commit().await?;

        log::info!(
            "✅ Maintenance type {} '{}' created for configuration {}",
            definition.id,
            definition.name,
            definition.configuration_id
        );
        Ok(definition)
    }

    /// Tipos que aplican a la configuración del vehículo
    pub async fn list_for_vehicle(
        pool: &SqlitePool,
        vehicle_id: i64,
    ) -> AppResult<Vec<MaintenanceTypeDefinition>> {
        let mut conn = pool.acquire().await?;

        let vehicle = VehicleRepository::find_by_id(&mut conn, vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;

        MaintenanceTypeRepository::list_by_configuration(&mut conn, vehicle.configuration_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::maintenance_type::DistanceUnit;

    fn request(
        category: &str,
        miles: Option<i64>,
        unit: DistanceUnit,
    ) -> CreateMaintenanceTypeRequest {
        CreateMaintenanceTypeRequest {
            vehicle_id: 1,
            name: "  Oil Change ".to_string(),
            category: category.to_string(),
            mile_interval: miles,
            month_interval: Some(6),
            distance_unit: unit,
        }
    }

    #[test]
    fn test_category_accepts_exact_and_spanish_names() {
        assert_eq!(resolve_category("engine").unwrap(), MaintenanceCategory::Engine);
        assert_eq!(resolve_category("Frenos").unwrap(), MaintenanceCategory::Brakes);
        assert!(resolve_category("Oil").is_err());
    }

    #[test]
    fn test_candidate_is_normalized_to_miles() {
        let candidate =
            build_candidate(3, &request("Engine", Some(10_000), DistanceUnit::Km)).unwrap();
        assert_eq!(candidate.configuration_id, 3);
        assert_eq!(candidate.name, "Oil Change");
        assert_eq!(candidate.mile_interval, Some(6213));
        assert_eq!(candidate.month_interval, Some(6));
    }

    #[test]
    fn test_interval_rounding_to_zero_is_rejected() {
        assert!(build_candidate(3, &request("Engine", Some(1), DistanceUnit::Km)).is_err());
        assert!(build_candidate(3, &request("Engine", None, DistanceUnit::Km)).is_ok());
    }
}
