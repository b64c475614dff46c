//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::gemini_client::SuggestionClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
    /// `None` sin credencial: las sugerencias responden 503 sin llamar al servicio
    pub suggestion_client: Option<Arc<dyn SuggestionClient>>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        config: EnvironmentConfig,
        suggestion_client: Option<Arc<dyn SuggestionClient>>,
    ) -> Self {
        Self {
            pool,
            config,
            suggestion_client,
        }
    }

    pub fn suggestion_client(&self) -> Option<&dyn SuggestionClient> {
        self.suggestion_client.as_deref()
    }
}
