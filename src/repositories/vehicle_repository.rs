use sqlx::SqliteConnection;

use crate::models::vehicle::{VehicleConfiguration, VehicleWithConfiguration};
use crate::utils::errors::AppError;

const SELECT_VEHICLE_WITH_CONFIGURATION: &str = r#"
    SELECT v.id, v.alias, v.configuration_id,
           c.brand, c.model, c.year, c.engine_type, c.transmission_type
    FROM vehicles v
    JOIN vehicle_configurations c ON c.id = v.configuration_id
"#;

/// Datos de una configuración todavía sin id
#[derive(Debug, Clone)]
pub struct NewConfiguration<'a> {
    pub brand: &'a str,
    pub model: &'a str,
    pub year: i64,
    pub engine_type: &'a str,
    pub transmission_type: &'a str,
}

pub struct VehicleRepository;

impl VehicleRepository {
    pub async fn find_configuration(
        conn: &mut SqliteConnection,
        config: &NewConfiguration<'_>,
    ) -> Result<Option<VehicleConfiguration>, AppError> {
        let found = sqlx::query_as::<_, VehicleConfiguration>(
            r#"
            SELECT id, brand, model, year, engine_type, transmission_type
            FROM vehicle_configurations
            WHERE brand = ? AND model = ? AND year = ? AND engine_type = ? AND transmission_type = ?
            "#,
        )
        .bind(config.brand)
        .bind(config.model)
        .bind(config.year)
        .bind(config.engine_type)
        .bind(config.transmission_type)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(found)
    }

    /// Reutiliza una configuración idéntica; las configuraciones son inmutables y compartidas
    pub async fn find_or_create_configuration(
        conn: &mut SqliteConnection,
        config: &NewConfiguration<'_>,
    ) -> Result<i64, AppError> {
        if let Some(existing) = Self::find_configuration(conn, config).await? {
            return Ok(existing.id);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO vehicle_configurations (brand, model, year, engine_type, transmission_type)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(config.brand)
        .bind(config.model)
        .bind(config.year)
        .bind(config.engine_type)
        .bind(config.transmission_type)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn create(
        conn: &mut SqliteConnection,
        alias: &str,
        configuration_id: i64,
    ) -> Result<i64, AppError> {
        let result = sqlx::query("INSERT INTO vehicles (alias, configuration_id) VALUES (?, ?)")
            .bind(alias)
            .bind(configuration_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<VehicleWithConfiguration>, AppError> {
        let vehicle = sqlx::query_as::<_, VehicleWithConfiguration>(&format!(
            "{} WHERE v.id = ?",
            SELECT_VEHICLE_WITH_CONFIGURATION
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(vehicle)
    }

    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<VehicleWithConfiguration>, AppError> {
        let vehicles = sqlx::query_as::<_, VehicleWithConfiguration>(&format!(
            "{} ORDER BY v.alias, v.id",
            SELECT_VEHICLE_WITH_CONFIGURATION
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(vehicles)
    }
}
