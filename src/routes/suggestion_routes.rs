use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::controllers::suggestion_controller::SuggestionController;
use crate::dto::suggestion_dto::{SuggestionRequest, SuggestionResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_suggestion_router() -> Router<AppState> {
    Router::new().route("/", post(get_suggestion))
}

async fn get_suggestion(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    request.validate()?;
    let controller = SuggestionController::new(&state);
    Ok(Json(controller.suggest(request).await?))
}
