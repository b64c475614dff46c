use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::maintenance_record::MaintenanceRecord;

// Request para registrar un mantenimiento.
// El precio llega tal cual (número o texto) y se valida antes de abrir la transacción.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRecordRequest {
    #[validate(range(min = 1))]
    pub vehicle_id: i64,
    #[validate(range(min = 1))]
    pub maintenance_type_id: i64,
    #[validate(range(min = 1))]
    pub mechanic_id: i64,
    /// Fecha de la observación, YYYY-MM-DD
    pub date: String,
    #[validate(range(min = 0))]
    pub reading: i64,
    #[serde(default)]
    pub price: Value,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

// Response de creación de registro
#[derive(Debug, Serialize)]
pub struct MaintenanceRecordResponse {
    #[serde(flatten)]
    pub record: MaintenanceRecord,
    /// true si la observación (vehículo, fecha, lectura) ya existía
    pub observation_reused: bool,
}
