use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::VehicleWithConfiguration;
use crate::utils::validation::validate_not_empty;

// Request para crear un vehículo junto con su configuración
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub alias: String,
    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub brand: String,
    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i64,
    #[validate(length(max = 50), custom = "validate_not_empty")]
    pub engine_type: String,
    #[validate(length(max = 50), custom = "validate_not_empty")]
    pub transmission_type: String,
}

// Response de vehículo con su configuración aplanada
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub alias: String,
    pub configuration_id: i64,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub engine_type: String,
    pub transmission_type: String,
    pub description: String,
}

impl From<VehicleWithConfiguration> for VehicleResponse {
    fn from(vehicle: VehicleWithConfiguration) -> Self {
        let description = vehicle.configuration().describe();
        Self {
            id: vehicle.id,
            alias: vehicle.alias,
            configuration_id: vehicle.configuration_id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            engine_type: vehicle.engine_type,
            transmission_type: vehicle.transmission_type,
            description,
        }
    }
}
