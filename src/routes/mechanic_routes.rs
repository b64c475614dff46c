use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use validator::Validate;

use crate::controllers::mechanic_controller::MechanicController;
use crate::dto::mechanic_dto::CreateMechanicRequest;
use crate::dto::response_dto::ApiResponse;
use crate::models::mechanic::Mechanic;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_mechanic_router() -> Router<AppState> {
    Router::new().route("/", get(list_mechanics).post(create_mechanic))
}

async fn create_mechanic(
    State(state): State<AppState>,
    Json(request): Json<CreateMechanicRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Mechanic>>), AppError> {
    request.validate()?;
    let controller = MechanicController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_mechanics(State(state): State<AppState>) -> Result<Json<Vec<Mechanic>>, AppError> {
    let controller = MechanicController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}
