use sqlx::PgPool;
use uuid::Uuid;

use crate::models::plan::Plan;
use crate::utils::errors::AppError;

pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, AppError> {
        let plan = sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(plan)
    }

    /// Plan contratado por un vehículo, si tiene
    pub async fn find_for_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Plan>, AppError> {
        let plan = sqlx::query_as::<_, Plan>(
            r#"
            SELECT p.* FROM plans p
            JOIN vehicles v ON v.plan_id = p.id
            WHERE v.id = $1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }
}
