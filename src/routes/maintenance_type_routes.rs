use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use validator::Validate;

use crate::controllers::maintenance_type_controller::MaintenanceTypeController;
use crate::dto::maintenance_type_dto::CreateMaintenanceTypeRequest;
use crate::dto::response_dto::ApiResponse;
use crate::models::maintenance_type::MaintenanceTypeDefinition;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_type_router() -> Router<AppState> {
    Router::new().route("/", post(create_maintenance_type))
}

async fn create_maintenance_type(
    State(state): State<AppState>,
    Json(request): Json<CreateMaintenanceTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceTypeDefinition>>), AppError> {
    request.validate()?;
    let controller = MaintenanceTypeController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
