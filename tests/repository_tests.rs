mod common;

use chrono::NaiveDate;
use serde_json::json;

use common::{civic, model_3, seed_mechanic, seed_type, seed_vehicle, test_pool};
use vehicle_maintenance::database::schema_repair::{
    assess_identity, ensure_maintenance_type_identity, inspect_columns, HealOutcome,
    IdentityStatus,
};
use vehicle_maintenance::dto::{CreateMaintenanceRecordRequest, CreateMaintenanceTypeRequest};
use vehicle_maintenance::models::maintenance_type::{
    DistanceUnit, MaintenanceCategory, NewMaintenanceType,
};
use vehicle_maintenance::models::observation::ObservationOutcome;
use vehicle_maintenance::services::{DuplicateGuard, MaintenanceService, MaintenanceTypeService};
use vehicle_maintenance::utils::errors::AppError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record_request(
    vehicle_id: i64,
    maintenance_type_id: i64,
    mechanic_id: i64,
    day: &str,
    reading: i64,
) -> CreateMaintenanceRecordRequest {
    CreateMaintenanceRecordRequest {
        vehicle_id,
        maintenance_type_id,
        mechanic_id,
        date: day.to_string(),
        reading,
        price: json!(89.90),
        notes: None,
    }
}

#[tokio::test]
async fn test_identical_configuration_is_shared() {
    let pool = test_pool().await;
    let (first, first_config) = seed_vehicle(&pool, "Daily", civic()).await;
    let (second, second_config) = seed_vehicle(&pool, "Spare", civic()).await;
    let (_, other_config) = seed_vehicle(&pool, "Tesla", model_3()).await;

    assert_ne!(first, second);
    assert_eq!(first_config, second_config);
    assert_ne!(first_config, other_config);
}

#[tokio::test]
async fn test_observation_is_reused() {
    let pool = test_pool().await;
    let (vehicle_id, _) = seed_vehicle(&pool, "Daily", civic()).await;
    let mut conn = pool.acquire().await.unwrap();

    let day = date(2024, 3, 1);

    let first = DuplicateGuard::register_observation(&mut conn, vehicle_id, day, 12_000)
        .await
        .unwrap();
    let second = DuplicateGuard::register_observation(&mut conn, vehicle_id, day, 12_000)
        .await
        .unwrap();
    let other_reading = DuplicateGuard::register_observation(&mut conn, vehicle_id, day, 12_001)
        .await
        .unwrap();

    assert!(matches!(first, ObservationOutcome::Created(_)));
    assert_eq!(second, ObservationOutcome::Reused(first.id()));
    assert!(matches!(other_reading, ObservationOutcome::Created(_)));
    assert_ne!(other_reading.id(), first.id());
}

#[tokio::test]
async fn test_type_with_null_intervals_is_duplicate() {
    let pool = test_pool().await;
    let (_, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;
    seed_type(&pool, configuration_id, "Inspection", None, None).await;

    let mut conn = pool.acquire().await.unwrap();
    let same = NewMaintenanceType {
        configuration_id,
        name: "Inspection".to_string(),
        category: MaintenanceCategory::Engine,
        mile_interval: None,
        month_interval: None,
    };
    let err = DuplicateGuard::check_maintenance_type(&mut conn, &same)
        .await
        .unwrap_err();
    assert!(err.is_duplicate());

    // un valor nunca iguala a NULL
    let with_miles = NewMaintenanceType {
        mile_interval: Some(5000),
        ..same.clone()
    };
    assert!(DuplicateGuard::check_maintenance_type(&mut conn, &with_miles).await.is_ok());

    let other_category = NewMaintenanceType {
        category: MaintenanceCategory::Body,
        ..same
    };
    assert!(DuplicateGuard::check_maintenance_type(&mut conn, &other_category).await.is_ok());
}

#[tokio::test]
async fn test_mechanic_identity_is_unique() {
    let pool = test_pool().await;
    seed_mechanic(&pool, "Ana Ruiz", "555-0101").await;

    let mut conn = pool.acquire().await.unwrap();
    assert!(DuplicateGuard::check_mechanic(&mut conn, "Ana Ruiz", "555-0101")
        .await
        .unwrap_err()
        .is_duplicate());
    assert!(DuplicateGuard::check_mechanic(&mut conn, "Ana Ruiz", "555-0202").await.is_ok());
}

#[tokio::test]
async fn test_create_definition_converts_km_and_rejects_duplicate() {
    let pool = test_pool().await;
    let (vehicle_id, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;

    let request = CreateMaintenanceTypeRequest {
        vehicle_id,
        name: "Oil Change".to_string(),
        category: "motor".to_string(),
        mile_interval: Some(10_000),
        month_interval: None,
        distance_unit: DistanceUnit::Km,
    };

    let created = MaintenanceTypeService::create_definition(&pool, &request).await.unwrap();
    assert_eq!(created.configuration_id, configuration_id);
    assert_eq!(created.category, MaintenanceCategory::Engine);
    assert_eq!(created.mile_interval, Some(6213));
    assert_eq!(created.month_interval, None);

    let again = MaintenanceTypeService::create_definition(&pool, &request).await;
    assert!(matches!(again, Err(AppError::Duplicate(_))));

    let listed = MaintenanceTypeService::list_for_vehicle(&pool, vehicle_id).await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_record_computes_due_point() {
    let pool = test_pool().await;
    let (vehicle_id, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;
    let type_id = seed_type(&pool, configuration_id, "Oil Change", Some(5000), Some(1)).await;
    let mechanic_id = seed_mechanic(&pool, "Ana Ruiz", "555-0101").await;

    let (record, observation) = MaintenanceService::create_record(
        &pool,
        &record_request(vehicle_id, type_id, mechanic_id, "2024-01-31", 10_000),
    )
    .await
    .unwrap();

    assert!(matches!(observation, ObservationOutcome::Created(_)));
    assert_eq!(record.next_due_date, Some(date(2024, 2, 29)));
    assert_eq!(record.next_due_reading, Some(15_000));
    assert_eq!(record.price, 89.90);
}

#[tokio::test]
async fn test_type_without_intervals_predicts_nothing() {
    let pool = test_pool().await;
    let (vehicle_id, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;
    let type_id = seed_type(&pool, configuration_id, "Detailing", None, None).await;
    let mechanic_id = seed_mechanic(&pool, "Ana Ruiz", "555-0101").await;

    let (record, _) = MaintenanceService::create_record(
        &pool,
        &record_request(vehicle_id, type_id, mechanic_id, "2024-05-10", 20_000),
    )
    .await
    .unwrap();

    assert_eq!(record.next_due_date, None);
    assert_eq!(record.next_due_reading, None);
}

#[tokio::test]
async fn test_same_service_twice_is_duplicate_and_reuses_observation() {
    let pool = test_pool().await;
    let (vehicle_id, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;
    let oil = seed_type(&pool, configuration_id, "Oil Change", Some(5000), None).await;
    let filter = seed_type(&pool, configuration_id, "Air Filter", Some(15_000), None).await;
    let mechanic_id = seed_mechanic(&pool, "Ana Ruiz", "555-0101").await;

    let (first, _) = MaintenanceService::create_record(
        &pool,
        &record_request(vehicle_id, oil, mechanic_id, "2024-03-01", 12_000),
    )
    .await
    .unwrap();

    let again = MaintenanceService::create_record(
        &pool,
        &record_request(vehicle_id, oil, mechanic_id, "2024-03-01", 12_000),
    )
    .await;
    assert!(matches!(again, Err(AppError::Duplicate(_))));

    // otro tipo en la misma visita comparte la observación
    let (second, observation) = MaintenanceService::create_record(
        &pool,
        &record_request(vehicle_id, filter, mechanic_id, "2024-03-01", 12_000),
    )
    .await
    .unwrap();
    assert_eq!(observation, ObservationOutcome::Reused(first.observation_id));
    assert_eq!(second.observation_id, first.observation_id);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM observations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_invalid_input_never_touches_store() {
    let pool = test_pool().await;
    let (vehicle_id, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;
    let type_id = seed_type(&pool, configuration_id, "Oil Change", Some(5000), None).await;
    let mechanic_id = seed_mechanic(&pool, "Ana Ruiz", "555-0101").await;

    let mut request = record_request(vehicle_id, type_id, mechanic_id, "2024-03-01", 12_000);
    request.price = json!("-10");
    assert!(matches!(
        MaintenanceService::create_record(&pool, &request).await,
        Err(AppError::BadRequest(_))
    ));

    let missing_vehicle = record_request(999, type_id, mechanic_id, "2024-03-01", 12_000);
    assert!(matches!(
        MaintenanceService::create_record(&pool, &missing_vehicle).await,
        Err(AppError::BadRequest(_))
    ));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM observations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_type_from_other_configuration_is_rejected() {
    let pool = test_pool().await;
    let (civic_id, _) = seed_vehicle(&pool, "Daily", civic()).await;
    let (_, tesla_config) = seed_vehicle(&pool, "Tesla", model_3()).await;
    let tesla_type = seed_type(&pool, tesla_config, "Cabin Filter", Some(20_000), None).await;
    let mechanic_id = seed_mechanic(&pool, "Ana Ruiz", "555-0101").await;

    let result = MaintenanceService::create_record(
        &pool,
        &record_request(civic_id, tesla_type, mechanic_id, "2024-03-01", 12_000),
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_history_and_upcoming() {
    let pool = test_pool().await;
    let (vehicle_id, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;
    let oil = seed_type(&pool, configuration_id, "Oil Change", Some(5000), Some(6)).await;
    let mechanic_id = seed_mechanic(&pool, "Ana Ruiz", "555-0101").await;

    for (day, reading) in [("2023-06-01", 5_000), ("2023-12-01", 10_000)] {
        MaintenanceService::create_record(
            &pool,
            &record_request(vehicle_id, oil, mechanic_id, day, reading),
        )
        .await
        .unwrap();
    }

    let history = MaintenanceService::history(&pool, vehicle_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].observed_on, date(2023, 12, 1));
    assert_eq!(history[0].mechanic_name, "Ana Ruiz");

    let upcoming = MaintenanceService::upcoming(&pool, vehicle_id, date(2024, 3, 1))
        .await
        .unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].next_due_date, Some(date(2024, 6, 1)));
    assert_eq!(upcoming[0].next_due_reading, Some(15_000));
    assert!(!upcoming[0].overdue);

    let later = MaintenanceService::upcoming(&pool, vehicle_id, date(2024, 7, 1))
        .await
        .unwrap();
    assert!(later[0].overdue);

    assert!(matches!(
        MaintenanceService::history(&pool, 404).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_self_heal_is_noop_on_proper_table() {
    let pool = test_pool().await;
    let (_, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;
    let existing = seed_type(&pool, configuration_id, "Oil Change", Some(5000), None).await;

    let mut conn = pool.acquire().await.unwrap();
    let outcome = ensure_maintenance_type_identity(&mut conn).await.unwrap();
    assert_eq!(outcome, HealOutcome::AlreadyHealthy);

    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM maintenance_types")
        .fetch_all(&mut *conn)
        .await
        .unwrap();
    assert_eq!(ids, vec![existing]);
}

#[tokio::test]
async fn test_self_heal_rebuilds_legacy_identity() {
    let pool = test_pool().await;
    let (vehicle_id, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;

    {
        let mut conn = pool.acquire().await.unwrap();
        sqlx::query("DROP TABLE maintenance_types")
            .execute(&mut *conn)
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE maintenance_types (id INTEGER, configuration_id INTEGER, name TEXT, \
             category TEXT, mile_interval INTEGER, month_interval INTEGER)",
        )
        .execute(&mut *conn)
        .await
        .unwrap();

        let legacy_rows = [
            (Some(1), "Oil Change"),
            (None, "Brake Pads"),
            (Some(5), "Coolant"),
            (None, "Tires"),
        ];
        for (id, name) in legacy_rows {
            sqlx::query(
                "INSERT INTO maintenance_types \
                 (id, configuration_id, name, category, mile_interval, month_interval) \
                 VALUES (?, ?, ?, 'Engine', NULL, 12)",
            )
            .bind(id)
            .bind(configuration_id)
            .bind(name)
            .execute(&mut *conn)
            .await
            .unwrap();
        }

        let before = inspect_columns(&mut conn, "maintenance_types").await.unwrap();
        assert_eq!(assess_identity(&before, "id"), IdentityStatus::NotAutoIncrementing);

        let outcome = ensure_maintenance_type_identity(&mut conn).await.unwrap();
        assert_eq!(outcome, HealOutcome::Rebuilt { preserved: 2, assigned: 2 });

        let after = inspect_columns(&mut conn, "maintenance_types").await.unwrap();
        assert_eq!(assess_identity(&after, "id"), IdentityStatus::Genuine);

        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM maintenance_types ORDER BY id")
                .fetch_all(&mut *conn)
                .await
                .unwrap();
        assert_eq!(
            rows,
            vec![
                (1, "Oil Change".to_string()),
                (5, "Coolant".to_string()),
                (6, "Brake Pads".to_string()),
                (7, "Tires".to_string()),
            ]
        );
    }

    // la siguiente inserción recibe una identidad nueva
    let request = CreateMaintenanceTypeRequest {
        vehicle_id,
        name: "Spark Plugs".to_string(),
        category: "Engine".to_string(),
        mile_interval: Some(30_000),
        month_interval: None,
        distance_unit: DistanceUnit::Miles,
    };
    let created = MaintenanceTypeService::create_definition(&pool, &request).await.unwrap();
    assert_eq!(created.id, 8);
}

#[tokio::test]
async fn test_self_heal_creates_missing_table() {
    let pool = test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    sqlx::query("DROP TABLE maintenance_records")
        .execute(&mut *conn)
        .await
        .unwrap();
    sqlx::query("DROP TABLE maintenance_types")
        .execute(&mut *conn)
        .await
        .unwrap();

    let outcome = ensure_maintenance_type_identity(&mut conn).await.unwrap();
    assert_eq!(outcome, HealOutcome::Created);
    assert_eq!(
        ensure_maintenance_type_identity(&mut conn).await.unwrap(),
        HealOutcome::AlreadyHealthy
    );
}

#[tokio::test]
async fn test_self_heal_assigns_ids_when_identity_column_is_absent() {
    let pool = test_pool().await;
    let (_, configuration_id) = seed_vehicle(&pool, "Daily", civic()).await;
    let mut conn = pool.acquire().await.unwrap();

    sqlx::query("DROP TABLE maintenance_types")
        .execute(&mut *conn)
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE maintenance_types (configuration_id INTEGER, name TEXT, \
         category TEXT, mile_interval INTEGER, month_interval INTEGER)",
    )
    .execute(&mut *conn)
    .await
    .unwrap();
    for name in ["Oil Change", "Brake Pads"] {
        sqlx::query(
            "INSERT INTO maintenance_types \
             (configuration_id, name, category, mile_interval, month_interval) \
             VALUES (?, ?, 'Engine', 5000, NULL)",
        )
        .bind(configuration_id)
        .bind(name)
        .execute(&mut *conn)
        .await
        .unwrap();
    }

    let before = inspect_columns(&mut conn, "maintenance_types").await.unwrap();
    assert_eq!(assess_identity(&before, "id"), IdentityStatus::MissingColumn);

    let outcome = ensure_maintenance_type_identity(&mut conn).await.unwrap();
    assert_eq!(outcome, HealOutcome::Rebuilt { preserved: 0, assigned: 2 });

    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM maintenance_types ORDER BY id")
        .fetch_all(&mut *conn)
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![(1, "Oil Change".to_string()), (2, "Brake Pads".to_string())]
    );
}
