use crate::dto::suggestion_dto::{SuggestionRequest, SuggestionResponse};
use crate::services::suggestion_service::SuggestionService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct SuggestionController<'a> {
    state: &'a AppState,
}

impl<'a> SuggestionController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn suggest(&self, request: SuggestionRequest) -> Result<SuggestionResponse, AppError> {
        SuggestionService::new(self.state.suggestion_client())
            .suggest(&self.state.pool, &request)
            .await
    }
}
