use sqlx::{Connection, SqlitePool};

use crate::dto::mechanic_dto::CreateMechanicRequest;
use crate::dto::response_dto::ApiResponse;
use crate::models::mechanic::Mechanic;
use crate::repositories::mechanic_repository::MechanicRepository;
use crate::services::duplicate_guard::DuplicateGuard;
use crate::utils::errors::AppError;

pub struct MechanicController {
    pool: SqlitePool,
}

impl MechanicController {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        request: CreateMechanicRequest,
    ) -> Result<ApiResponse<Mechanic>, AppError> {
        let name = request.name.trim();
        let phone = request.phone.trim();

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        DuplicateGuard::check_mechanic(&mut tx, name, phone).await?;
        let mechanic = MechanicRepository::create(&mut tx, name, phone).await?;

        tx.commit().await?;

        log::info!("👷 Mechanic {} '{}' registered", mechanic.id, mechanic.name);

        Ok(ApiResponse::success_with_message(
            mechanic,
            "Mechanic registered".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<Mechanic>, AppError> {
        let mut conn = self.pool.acquire().await?;
        MechanicRepository::list(&mut conn).await
    }
}
