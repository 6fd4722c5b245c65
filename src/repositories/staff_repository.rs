use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::staff::Staff;
use crate::utils::errors::AppError;

pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: String) -> Result<Staff, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            INSERT INTO staff (id, name, active, created_at)
            VALUES ($1, $2, true, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(staff)
    }

    /// Listar colaboradores; `active = Some(true)` limita a los asignables
    pub async fn list(&self, active: Option<bool>) -> Result<Vec<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            SELECT * FROM staff
            WHERE ($1::boolean IS NULL OR active = $1)
            ORDER BY name
            "#,
        )
        .bind(active)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM staff WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        active: Option<bool>,
    ) -> Result<Staff, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Colaborador no encontrado".to_string()))?;

        let staff = sqlx::query_as::<_, Staff>(
            r#"
            UPDATE staff
            SET name = $2, active = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(active.unwrap_or(current.active))
        .fetch_one(&self.pool)
        .await?;

        Ok(staff)
    }
}
