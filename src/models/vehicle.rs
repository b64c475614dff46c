//! Modelo de Vehicle
//!
//! Un vehículo es un alias de usuario que apunta a una configuración
//! (marca, modelo, año, motor, transmisión). La configuración decide qué
//! tipos de mantenimiento aplican y puede compartirse entre vehículos.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Configuración de vehículo - mapea a la tabla vehicle_configurations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VehicleConfiguration {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub engine_type: String,
    pub transmission_type: String,
}

impl VehicleConfiguration {
    /// Descripción corta usada en los prompts, ej. "2019 Honda Civic (Gasoline, Automatic)"
    pub fn describe(&self) -> String {
        format!(
            "{} {} {} ({}, {})",
            self.year, self.brand, self.model, self.engine_type, self.transmission_type
        )
    }
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub alias: String,
    pub configuration_id: i64,
}

/// Vehículo junto con su configuración, tal como se lee con un JOIN
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleWithConfiguration {
    pub id: i64,
    pub alias: String,
    pub configuration_id: i64,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub engine_type: String,
    pub transmission_type: String,
}

impl VehicleWithConfiguration {
    pub fn configuration(&self) -> VehicleConfiguration {
        VehicleConfiguration {
            id: self.configuration_id,
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            engine_type: self.engine_type.clone(),
            transmission_type: self.transmission_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_configuration() {
        let config = VehicleConfiguration {
            id: 1,
            brand: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2019,
            engine_type: "Gasoline".to_string(),
            transmission_type: "Automatic".to_string(),
        };
        assert_eq!(config.describe(), "2019 Honda Civic (Gasoline, Automatic)");
    }
}
