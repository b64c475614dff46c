use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_not_empty, validate_phone};

// Request para registrar un mecánico
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMechanicRequest {
    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub name: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
}
