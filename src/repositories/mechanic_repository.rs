use sqlx::SqliteConnection;

use crate::models::mechanic::Mechanic;
use crate::utils::errors::AppError;

pub struct MechanicRepository;

impl MechanicRepository {
    pub async fn find_by_identity(
        conn: &mut SqliteConnection,
        name: &str,
        phone: &str,
    ) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM mechanics WHERE name = ? AND phone = ?")
            .bind(name)
            .bind(phone)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(id)
    }

    pub async fn create(
        conn: &mut SqliteConnection,
        name: &str,
        phone: &str,
    ) -> Result<Mechanic, AppError> {
        let result = sqlx::query("INSERT INTO mechanics (name, phone) VALUES (?, ?)")
            .bind(name)
            .bind(phone)
            .execute(&mut *conn)
            .await?;

        Ok(Mechanic {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Mechanic>, AppError> {
        let mechanic = sqlx::query_as::<_, Mechanic>("SELECT id, name, phone FROM mechanics WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(mechanic)
    }

    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Mechanic>, AppError> {
        let mechanics = sqlx::query_as::<_, Mechanic>("SELECT id, name, phone FROM mechanics ORDER BY name, id")
            .fetch_all(&mut *conn)
            .await?;

        Ok(mechanics)
    }
}
