use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::maintenance_type::MaintenanceCategory;
use crate::services::suggestion_parser::IntervalKind;
use crate::utils::validation::validate_not_empty;

/// Qué se le pide al servicio generativo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionQuantity {
    Mileage,
    Months,
    Category,
}

impl SuggestionQuantity {
    pub fn interval_kind(self) -> Option<IntervalKind> {
        match self {
            SuggestionQuantity::Mileage => Some(IntervalKind::Mileage),
            SuggestionQuantity::Months => Some(IntervalKind::Months),
            SuggestionQuantity::Category => None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SuggestionRequest {
    #[validate(range(min = 1))]
    pub vehicle_id: i64,
    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub maintenance_name: String,
    pub quantity: SuggestionQuantity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SuggestionResult {
    Interval {
        value: i64,
        unit: &'static str,
        explanation: Option<String>,
    },
    Category {
        category: MaintenanceCategory,
    },
    NotApplicable,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    pub vehicle_id: i64,
    pub maintenance_name: String,
    pub quantity: SuggestionQuantity,
    #[serde(flatten)]
    pub result: SuggestionResult,
}
