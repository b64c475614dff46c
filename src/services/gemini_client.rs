//! Cliente del servicio generativo (Gemini)
//!
//! El núcleo sólo conoce el trait `SuggestionClient`: un prompt sale, un texto
//! libre vuelve. Cualquier fallo de la llamada se reporta como
//! `SuggestionsUnavailable`, nunca como fallo de interpretación.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait SuggestionClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatena las partes de texto del primer candidato
    fn first_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// `None` cuando no hay credencial configurada: la funcionalidad queda deshabilitada
    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Option<Self>> {
        match &config.gemini_api_key {
            Some(key) => Self::new(
                key.clone(),
                config.gemini_model.clone(),
                config.gemini_api_url.clone(),
            )
            .map(Some),
            None => Ok(None),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            urlencoding::encode(&self.model),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl SuggestionClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        log::info!("🤖 Requesting suggestion from {}", self.model);

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::SuggestionsUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Gemini returned {}: {}", status, error_text);
            return Err(AppError::SuggestionsUnavailable(format!(
                "Suggestion service returned {}",
                status
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            AppError::SuggestionsUnavailable(format!("Unreadable suggestion response: {}", e))
        })?;

        let text = parsed.first_text().ok_or_else(|| {
            AppError::SuggestionsUnavailable("Suggestion service returned no text".to_string())
        })?;

        log::debug!("🤖 Raw suggestion: {}", text);
        Ok(text)
    }
}
