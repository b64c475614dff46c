//! Services module
//!
//! Lógica de negocio: cálculo de vencimientos, interpretación de sugerencias,
//! guardia de duplicados y los flujos que combinan varios repositorios.

pub mod category_classifier;
pub mod due_calculator;
pub mod duplicate_guard;
pub mod gemini_client;
pub mod maintenance_service;
pub mod maintenance_type_service;
pub mod suggestion_parser;
pub mod suggestion_prompts;
pub mod suggestion_service;

pub use duplicate_guard::DuplicateGuard;
pub use gemini_client::{GeminiClient, SuggestionClient};
pub use maintenance_service::MaintenanceService;
pub use maintenance_type_service::MaintenanceTypeService;
pub use suggestion_service::SuggestionService;
