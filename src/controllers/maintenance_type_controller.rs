use sqlx::SqlitePool;

use crate::dto::maintenance_type_dto::CreateMaintenanceTypeRequest;
use crate::dto::response_dto::ApiResponse;
use crate::models::maintenance_type::MaintenanceTypeDefinition;
use crate::services::maintenance_type_service::MaintenanceTypeService;
use crate::utils::errors::AppError;

pub struct MaintenanceTypeController {
    pool: SqlitePool,
}

impl MaintenanceTypeController {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        request: CreateMaintenanceTypeRequest,
    ) -> Result<ApiResponse<MaintenanceTypeDefinition>, AppError> {
        let definition = MaintenanceTypeService::create_definition(&self.pool, &request).await?;

        let message = if definition.mile_interval.is_none() && definition.month_interval.is_none() {
            "Maintenance type created without intervals; no due date will be predicted"
        } else {
            "Maintenance type created"
        };

        Ok(ApiResponse::success_with_message(definition, message.to_string()))
    }

    pub async fn list_for_vehicle(
        &self,
        vehicle_id: i64,
    ) -> Result<Vec<MaintenanceTypeDefinition>, AppError> {
        MaintenanceTypeService::list_for_vehicle(&self.pool, vehicle_id).await
    }
}
