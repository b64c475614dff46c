use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use validator::Validate;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::{CreateMaintenanceRecordRequest, MaintenanceRecordResponse};
use crate::dto::response_dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new().route("/", post(create_maintenance_record))
}

async fn create_maintenance_record(
    State(state): State<AppState>,
    Json(request): Json<CreateMaintenanceRecordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceRecordResponse>>), AppError> {
    request.validate()?;
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
