//! Servicio de sugerencias
//!
//! Flujo: vehículo → prompt → servicio generativo → parser / clasificador.
//! Un fallo de interpretación viaja con el texto crudo para que el cliente
//! pueda mostrarlo; nunca se sustituye por un valor por defecto.

use sqlx::SqlitePool;

use crate::dto::suggestion_dto::{
    SuggestionQuantity, SuggestionRequest, SuggestionResponse, SuggestionResult,
};
use crate::models::vehicle::VehicleConfiguration;
use crate::repositories::VehicleRepository;
use crate::services::category_classifier::{classify_category, ClassificationOutcome};
use crate::services::gemini_client::SuggestionClient;
use crate::services::suggestion_parser::{SuggestionOutcome, SuggestionParser};
use crate::services::suggestion_prompts::{category_prompt, interval_prompt};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct SuggestionService<'a> {
    client: Option<&'a dyn SuggestionClient>,
}

impl<'a> SuggestionService<'a> {
    pub fn new(client: Option<&'a dyn SuggestionClient>) -> Self {
        Self { client }
    }

    pub async fn suggest(
        &self,
        pool: &SqlitePool,
        request: &SuggestionRequest,
    ) -> AppResult<SuggestionResponse> {
        let client = self.client.ok_or_else(|| {
            AppError::SuggestionsUnavailable(
                "No GEMINI_API_KEY configured; AI suggestions are disabled".to_string(),
            )
        })?;

        // La conexión se libera antes de la llamada externa
        let configuration = {
            let mut conn = pool.acquire().await?;
            VehicleRepository::find_by_id(&mut conn, request.vehicle_id)
                .await?
                .ok_or_else(|| not_found_error("Vehicle", request.vehicle_id))?
                .configuration()
        };

        let maintenance_name = request.maintenance_name.trim();
        let prompt = build_prompt(&configuration, maintenance_name, request.quantity);

        log::info!(
            "🤖 Suggestion requested: {} / {:?} for {}",
            maintenance_name,
            request.quantity,
            configuration.describe()
        );

        let raw_text = client.generate(&prompt).await?;
        log::debug!("🤖 Raw suggestion text: {}", raw_text);
        let result = interpret(&raw_text, request.quantity, configuration.year)?;

        Ok(SuggestionResponse {
            vehicle_id: request.vehicle_id,
            maintenance_name: maintenance_name.to_string(),
            quantity: request.quantity,
            result,
        })
    }
}

pub fn build_prompt(
    configuration: &VehicleConfiguration,
    maintenance_name: &str,
    quantity: SuggestionQuantity,
) -> String {
    match quantity.interval_kind() {
        Some(kind) => interval_prompt(configuration, maintenance_name, kind),
        None => category_prompt(configuration, maintenance_name),
    }
}

/// Convierte el texto crudo en un resultado o en `ParseFailure` con el texto incluido
pub fn interpret(
    raw_text: &str,
    quantity: SuggestionQuantity,
    model_year: i64,
) -> AppResult<SuggestionResult> {
    let parse_failure = |reason: String| AppError::ParseFailure {
        reason,
        raw_text: raw_text.to_string(),
    };

    match quantity.interval_kind() {
        Some(kind) => match SuggestionParser::new(kind).with_model_year(model_year).parse(raw_text) {
            SuggestionOutcome::Applicable { value, explanation } => Ok(SuggestionResult::Interval {
                value,
                unit: kind.unit_label(),
                explanation,
            }),
            SuggestionOutcome::NotApplicable => Ok(SuggestionResult::NotApplicable),
            SuggestionOutcome::Failed { reason } => Err(parse_failure(reason)),
        },
        None => match classify_category(raw_text) {
            ClassificationOutcome::Category { category } => Ok(SuggestionResult::Category { category }),
            ClassificationOutcome::NotApplicable => Ok(SuggestionResult::NotApplicable),
            ClassificationOutcome::Failed { reason } => Err(parse_failure(reason)),
        },
    }
}
