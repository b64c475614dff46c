use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::models::observation::Observation;
use crate::utils::errors::AppError;

pub struct ObservationRepository;

impl ObservationRepository {
    pub async fn find(
        conn: &mut SqliteConnection,
        vehicle_id: i64,
        observed_on: NaiveDate,
        reading: i64,
    ) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM observations WHERE vehicle_id = ? AND observed_on = ? AND reading = ?",
        )
        .bind(vehicle_id)
        .bind(observed_on)
        .bind(reading)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(id)
    }

    pub async fn create(
        conn: &mut SqliteConnection,
        vehicle_id: i64,
        observed_on: NaiveDate,
        reading: i64,
    ) -> Result<i64, AppError> {
        let result = sqlx::query(
            "INSERT INTO observations (vehicle_id, observed_on, reading) VALUES (?, ?, ?)",
        )
        .bind(vehicle_id)
        .bind(observed_on)
        .bind(reading)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Observation>, AppError> {
        let observation = sqlx::query_as::<_, Observation>(
            "SELECT id, vehicle_id, observed_on, reading FROM observations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(observation)
    }

    /// Lectura más alta registrada para el vehículo
    pub async fn latest_reading(
        conn: &mut SqliteConnection,
        vehicle_id: i64,
    ) -> Result<Option<i64>, AppError> {
        let reading = sqlx::query_scalar::<_, i64>(
            "SELECT reading FROM observations WHERE vehicle_id = ? ORDER BY reading DESC LIMIT 1",
        )
        .bind(vehicle_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(reading)
    }
}
