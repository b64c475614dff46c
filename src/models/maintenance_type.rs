//! Modelo de tipo de mantenimiento
//!
//! Definiciones de intervalos (millas / meses) por configuración de vehículo.
//! Es el "Interval Store": el calculador de vencimientos sólo lee de aquí.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;

/// Factor usado por la migración original de kilómetros a millas
pub const KM_TO_MILES: f64 = 0.621371;

/// Categoría de mantenimiento - taxonomía cerrada, en orden canónico
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
pub enum MaintenanceCategory {
    Engine,
    Brakes,
    Transmission,
    Suspension,
    Electrical,
    Tires,
    Body,
    Cooling,
}

impl MaintenanceCategory {
    /// Orden canónico: el clasificador difuso se queda con el primero que coincide
    pub const ALL: [MaintenanceCategory; 8] = [
        MaintenanceCategory::Engine,
        MaintenanceCategory::Brakes,
        MaintenanceCategory::Transmission,
        MaintenanceCategory::Suspension,
        MaintenanceCategory::Electrical,
        MaintenanceCategory::Tires,
        MaintenanceCategory::Body,
        MaintenanceCategory::Cooling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceCategory::Engine => "Engine",
            MaintenanceCategory::Brakes => "Brakes",
            MaintenanceCategory::Transmission => "Transmission",
            MaintenanceCategory::Suspension => "Suspension",
            MaintenanceCategory::Electrical => "Electrical",
            MaintenanceCategory::Tires => "Tires",
            MaintenanceCategory::Body => "Body",
            MaintenanceCategory::Cooling => "Cooling",
        }
    }
}

impl fmt::Display for MaintenanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaintenanceCategory {
    type Err = String;

    /// Coincidencia exacta sin distinguir mayúsculas; la búsqueda difusa vive en el clasificador
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MaintenanceCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown maintenance category '{}'", s))
    }
}

/// Unidad en la que llega un intervalo de distancia
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Km,
}

impl DistanceUnit {
    /// Normaliza a millas; los kilómetros se truncan hacia cero como en la migración original
    pub fn to_miles(self, value: i64) -> i64 {
        match self {
            DistanceUnit::Miles => value,
            DistanceUnit::Km => (value as f64 * KM_TO_MILES) as i64,
        }
    }
}

/// Definición de tipo de mantenimiento - mapea a la tabla maintenance_types
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MaintenanceTypeDefinition {
    pub id: i64,
    pub configuration_id: i64,
    pub name: String,
    pub category: MaintenanceCategory,
    pub mile_interval: Option<i64>,
    pub month_interval: Option<i64>,
}

/// Candidato a insertar, ya normalizado a millas
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceType {
    pub configuration_id: i64,
    pub name: String,
    pub category: MaintenanceCategory,
    pub mile_interval: Option<i64>,
    pub month_interval: Option<i64>,
}
