use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::controllers::maintenance_type_controller::MaintenanceTypeController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::response_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::models::maintenance_record::{MaintenanceHistoryEntry, UpcomingMaintenance};
use crate::models::maintenance_type::MaintenanceTypeDefinition;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle))
        .route("/:id/maintenance-types", get(list_maintenance_types))
        .route("/:id/maintenance", get(maintenance_history))
        .route("/:id/upcoming", get(upcoming_maintenance))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    request.validate()?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn list_maintenance_types(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MaintenanceTypeDefinition>>, AppError> {
    let controller = MaintenanceTypeController::new(state.pool.clone());
    Ok(Json(controller.list_for_vehicle(id).await?))
}

async fn maintenance_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MaintenanceHistoryEntry>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.history(id).await?))
}

async fn upcoming_maintenance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<UpcomingMaintenance>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.upcoming(id).await?))
}
