use serde::Deserialize;
use validator::Validate;

use crate::models::maintenance_type::DistanceUnit;
use crate::utils::validation::validate_not_empty;

// Request para definir un tipo de mantenimiento para la configuración de un vehículo.
// `mile_interval` llega en `distance_unit` y se guarda siempre en millas.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceTypeRequest {
    #[validate(range(min = 1))]
    pub vehicle_id: i64,
    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub name: String,
    pub category: String,
    #[validate(range(min = 1))]
    pub mile_interval: Option<i64>,
    #[validate(range(min = 1))]
    pub month_interval: Option<i64>,
    #[serde(default)]
    pub distance_unit: DistanceUnit,
}
