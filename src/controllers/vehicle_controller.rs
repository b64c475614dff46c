use sqlx::{Connection, SqlitePool};

use crate::dto::response_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::repositories::vehicle_repository::{NewConfiguration, VehicleRepository};
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    pool: SqlitePool,
}

impl VehicleController {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let configuration = NewConfiguration {
            brand: request.brand.trim(),
            model: request.model.trim(),
            year: request.year,
            engine_type: request.engine_type.trim(),
            transmission_type: request.transmission_type.trim(),
        };

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        // Una configuración idéntica se comparte entre vehículos
        let configuration_id =
            VehicleRepository::find_or_create_configuration(&mut tx, &configuration).await?;
        let vehicle_id =
            VehicleRepository::create(&mut tx, request.alias.trim(), configuration_id).await?;

        let vehicle = VehicleRepository::find_by_id(&mut tx, vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Vehicle {} vanished after insert", vehicle_id))
            })?;

        tx.commit().await?;

        log::info!("🚗 Vehicle {} '{}' created", vehicle.id, vehicle.alias);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehicle created".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<VehicleResponse, AppError> {
        let mut conn = self.pool.acquire().await?;

        let vehicle = VehicleRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let vehicles = VehicleRepository::list(&mut conn).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }
}
