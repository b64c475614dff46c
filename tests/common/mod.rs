#![allow(dead_code)]

use sqlx::SqlitePool;

use vehicle_maintenance::config::DatabaseConfig;
use vehicle_maintenance::database::run_migrations;
use vehicle_maintenance::models::maintenance_type::{MaintenanceCategory, NewMaintenanceType};
use vehicle_maintenance::repositories::{
    MaintenanceTypeRepository, MechanicRepository, NewConfiguration, VehicleRepository,
};

/// Pool en memoria con todas las tablas creadas
pub async fn test_pool() -> SqlitePool {
    let pool = DatabaseConfig::create_test_pool()
        .await
        .expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

pub fn civic() -> NewConfiguration<'static> {
    NewConfiguration {
        brand: "Honda",
        model: "Civic",
        year: 2019,
        engine_type: "Gasoline",
        transmission_type: "Automatic",
    }
}

pub fn model_3() -> NewConfiguration<'static> {
    NewConfiguration {
        brand: "Tesla",
        model: "Model 3",
        year: 2021,
        engine_type: "Electric",
        transmission_type: "Single-speed",
    }
}

/// Devuelve (vehicle_id, configuration_id)
pub async fn seed_vehicle(pool: &SqlitePool, alias: &str, config: NewConfiguration<'_>) -> (i64, i64) {
    let mut conn = pool.acquire().await.unwrap();
    let configuration_id = VehicleRepository::find_or_create_configuration(&mut conn, &config)
        .await
        .unwrap();
    let vehicle_id = VehicleRepository::create(&mut conn, alias, configuration_id)
        .await
        .unwrap();
    (vehicle_id, configuration_id)
}

pub async fn seed_type(
    pool: &SqlitePool,
    configuration_id: i64,
    name: &str,
    mile_interval: Option<i64>,
    month_interval: Option<i64>,
) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    let candidate = NewMaintenanceType {
        configuration_id,
        name: name.to_string(),
        category: MaintenanceCategory::Engine,
        mile_interval,
        month_interval,
    };
    MaintenanceTypeRepository::create(&mut conn, &candidate)
        .await
        .unwrap()
        .id
}

pub async fn seed_mechanic(pool: &SqlitePool, name: &str, phone: &str) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    MechanicRepository::create(&mut conn, name, phone).await.unwrap().id
}
