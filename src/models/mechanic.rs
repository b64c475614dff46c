//! Modelo de mecánico

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mecánico - mapea a la tabla mechanics, único por (name, phone)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Mechanic {
    pub id: i64,
    pub name: String,
    pub phone: String,
}
