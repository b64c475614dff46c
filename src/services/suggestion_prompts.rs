//! Plantillas de prompts para el servicio generativo

use crate::models::maintenance_type::MaintenanceCategory;
use crate::models::vehicle::VehicleConfiguration;
use crate::services::suggestion_parser::{
    IntervalKind, MAX_MILEAGE_INTERVAL, MAX_MONTH_INTERVAL, MIN_MILEAGE_INTERVAL,
};

const NOT_APPLICABLE_INSTRUCTION: &str =
    "If this maintenance does not apply to this vehicle, answer exactly: NOT APPLICABLE";

fn vehicle_context(config: &VehicleConfiguration) -> String {
    format!(
        "Vehicle: {} {} {}\nEngine: {}\nTransmission: {}",
        config.year, config.brand, config.model, config.engine_type, config.transmission_type
    )
}

pub fn interval_prompt(
    config: &VehicleConfiguration,
    maintenance_name: &str,
    kind: IntervalKind,
) -> String {
    let (question, range) = match kind {
        IntervalKind::Mileage => (
            "How many miles should pass between services",
            format!("{} to {}", MIN_MILEAGE_INTERVAL, MAX_MILEAGE_INTERVAL),
        ),
        IntervalKind::Months => (
            "How many months should pass between services",
            format!("1 to {}", MAX_MONTH_INTERVAL),
        ),
    };

    format!(
        "{context}\nMaintenance: {name}\n\n\
         {question} for this maintenance on this vehicle?\n\
         Answer with a single whole number of {unit} between {range}, in this exact format:\n\
         interval: <number>\n\
         explanation: <one short sentence>\n\
         {na}",
        context = vehicle_context(config),
        name = maintenance_name,
        question = question,
        unit = kind.unit_label(),
        range = range,
        na = NOT_APPLICABLE_INSTRUCTION,
    )
}

pub fn category_prompt(config: &VehicleConfiguration, maintenance_name: &str) -> String {
    let categories = MaintenanceCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{context}\nMaintenance: {name}\n\n\
         Which category does this maintenance belong to? Choose one of: {categories}.\n\
         Answer with the category name only.\n\
         {na}",
        context = vehicle_context(config),
        name = maintenance_name,
        categories = categories,
        na = NOT_APPLICABLE_INSTRUCTION,
    )
}
