use chrono::Utc;
use sqlx::SqlitePool;

use crate::dto::maintenance_dto::{CreateMaintenanceRecordRequest, MaintenanceRecordResponse};
use crate::dto::response_dto::ApiResponse;
use crate::models::maintenance_record::{MaintenanceHistoryEntry, UpcomingMaintenance};
use crate::models::observation::ObservationOutcome;
use crate::services::maintenance_service::MaintenanceService;
use crate::utils::errors::AppError;

pub struct MaintenanceController {
    pool: SqlitePool,
}

impl MaintenanceController {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        request: CreateMaintenanceRecordRequest,
    ) -> Result<ApiResponse<MaintenanceRecordResponse>, AppError> {
        let (record, observation) = MaintenanceService::create_record(&self.pool, &request).await?;

        let response = MaintenanceRecordResponse {
            record,
            observation_reused: matches!(observation, ObservationOutcome::Reused(_)),
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Maintenance record created".to_string(),
        ))
    }

    pub async fn history(&self, vehicle_id: i64) -> Result<Vec<MaintenanceHistoryEntry>, AppError> {
        MaintenanceService::history(&self.pool, vehicle_id).await
    }

    pub async fn upcoming(&self, vehicle_id: i64) -> Result<Vec<UpcomingMaintenance>, AppError> {
        let today = Utc::now().date_naive();
        MaintenanceService::upcoming(&self.pool, vehicle_id, today).await
    }
}
