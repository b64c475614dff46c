use sqlx::SqliteConnection;

use crate::models::maintenance_type::{MaintenanceTypeDefinition, NewMaintenanceType};
use crate::utils::errors::AppError;

pub struct MaintenanceTypeRepository;

impl MaintenanceTypeRepository {
    /// Busca una definición con la misma identidad lógica.
    ///
    /// `mile_interval = ?` es falso cuando ambos lados son NULL, por eso cada
    /// columna nulable lleva además una rama `IS NULL` explícita en ambos lados.
    pub async fn find_duplicate(
        conn: &mut SqliteConnection,
        candidate: &NewMaintenanceType,
    ) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM maintenance_types
            WHERE configuration_id = ?
              AND name = ?
              AND category = ?
              AND (mile_interval = ? OR (mile_interval IS NULL AND ? IS NULL))
              AND (month_interval = ? OR (month_interval IS NULL AND ? IS NULL))
            LIMIT 1
            "#,
        )
        .bind(candidate.configuration_id)
        .bind(&candidate.name)
        .bind(candidate.category)
        .bind(candidate.mile_interval)
        .bind(candidate.mile_interval)
        .bind(candidate.month_interval)
        .bind(candidate.month_interval)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(id)
    }

    pub async fn create(
        conn: &mut SqliteConnection,
        candidate: &NewMaintenanceType,
    ) -> Result<MaintenanceTypeDefinition, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO maintenance_types (configuration_id, name, category, mile_interval, month_interval)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(candidate.configuration_id)
        .bind(&candidate.name)
        .bind(candidate.category)
        .bind(candidate.mile_interval)
        .bind(candidate.month_interval)
        .execute(&mut *conn)
        .await?;

        Ok(MaintenanceTypeDefinition {
            id: result.last_insert_rowid(),
            configuration_id: candidate.configuration_id,
            name: candidate.name.clone(),
            category: candidate.category,
            mile_interval: candidate.mile_interval,
            month_interval: candidate.month_interval,
        })
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<MaintenanceTypeDefinition>, AppError> {
        let definition = sqlx::query_as::<_, MaintenanceTypeDefinition>(
            r#"
            SELECT id, configuration_id, name, category, mile_interval, month_interval
            FROM maintenance_types WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(definition)
    }

    pub async fn list_by_configuration(
        conn: &mut SqliteConnection,
        configuration_id: i64,
    ) -> Result<Vec<MaintenanceTypeDefinition>, AppError> {
        let definitions = sqlx::query_as::<_, MaintenanceTypeDefinition>(
            r#"
            SELECT id, configuration_id, name, category, mile_interval, month_interval
            FROM maintenance_types
            WHERE configuration_id = ?
            ORDER BY category, name, id
            "#,
        )
        .bind(configuration_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(definitions)
    }
}
