use chrono::{NaiveDate, Utc};
use sqlx::SqliteConnection;

use crate::models::maintenance_record::{MaintenanceHistoryEntry, MaintenanceRecord};
use crate::utils::errors::AppError;

const SELECT_HISTORY: &str = r#"
    SELECT r.id, r.maintenance_type_id, t.name AS maintenance_type, t.category,
           o.observed_on, o.reading, m.name AS mechanic_name,
           r.price, r.next_due_date, r.next_due_reading, r.notes
    FROM maintenance_records r
    JOIN maintenance_types t ON t.id = r.maintenance_type_id
    JOIN observations o ON o.id = r.observation_id
    JOIN mechanics m ON m.id = r.mechanic_id
"#;

/// Registro listo para insertar, con los vencimientos ya calculados
#[derive(Debug, Clone)]
pub struct NewMaintenanceRecord {
    pub vehicle_id: i64,
    pub maintenance_type_id: i64,
    pub observation_id: i64,
    pub mechanic_id: i64,
    pub price: f64,
    pub next_due_date: Option<NaiveDate>,
    pub next_due_reading: Option<i64>,
    pub notes: Option<String>,
}

pub struct MaintenanceRecordRepository;

impl MaintenanceRecordRepository {
    pub async fn find_duplicate(
        conn: &mut SqliteConnection,
        vehicle_id: i64,
        maintenance_type_id: i64,
        observation_id: i64,
    ) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM maintenance_records
            WHERE vehicle_id = ? AND maintenance_type_id = ? AND observation_id = ?
            "#,
        )
        .bind(vehicle_id)
        .bind(maintenance_type_id)
        .bind(observation_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(id)
    }

    pub async fn create(
        conn: &mut SqliteConnection,
        record: NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, AppError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO maintenance_records
                (vehicle_id, maintenance_type_id, observation_id, mechanic_id, price,
                 next_due_date, next_due_reading, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.vehicle_id)
        .bind(record.maintenance_type_id)
        .bind(record.observation_id)
        .bind(record.mechanic_id)
        .bind(record.price)
        .bind(record.next_due_date)
        .bind(record.next_due_reading)
        .bind(&record.notes)
        .bind(created_at)
        .execute(&mut *conn)
        .await?;

        Ok(MaintenanceRecord {
            id: result.last_insert_rowid(),
            vehicle_id: record.vehicle_id,
            maintenance_type_id: record.maintenance_type_id,
            observation_id: record.observation_id,
            mechanic_id: record.mechanic_id,
            price: record.price,
            next_due_date: record.next_due_date,
            next_due_reading: record.next_due_reading,
            notes: record.notes,
            created_at,
        })
    }

    /// Historial del vehículo, más reciente primero
    pub async fn history(
        conn: &mut SqliteConnection,
        vehicle_id: i64,
    ) -> Result<Vec<MaintenanceHistoryEntry>, AppError> {
        let entries = sqlx::query_as::<_, MaintenanceHistoryEntry>(&format!(
            "{} WHERE r.vehicle_id = ? ORDER BY o.observed_on DESC, o.reading DESC, r.id DESC",
            SELECT_HISTORY
        ))
        .bind(vehicle_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(entries)
    }
}
