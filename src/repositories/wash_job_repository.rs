use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::wash_job::WashJob;
use crate::utils::errors::AppError;

/// Fila del reporting: lavado terminado con las etiquetas del vehículo
/// resueltas por JOIN (dashboard BI y export CSV)
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub license_plate: String,
    pub owner_name: String,
    pub category_name: Option<String>,
    pub plan_name: Option<String>,
    pub external_staff_name: Option<String>,
    pub arrived_at: DateTime<Utc>,
    pub bay_entered_at: Option<DateTime<Utc>>,
    pub completed_at: DateTime<Utc>,
}

pub struct WashJobRepository {
    pool: PgPool,
}

impl WashJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        arrived_at: DateTime<Utc>,
        note: Option<String>,
    ) -> Result<WashJob, AppError> {
        let job = sqlx::query_as::<_, WashJob>(
            r#"
            INSERT INTO wash_jobs (id, vehicle_id, arrived_at, note)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(arrived_at)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WashJob>, AppError> {
        let job = sqlx::query_as::<_, WashJob>("SELECT * FROM wash_jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(job)
    }

    /// Lavados que llegaron dentro de la ventana [from, to).
    /// El ordenamiento del worklist se aplica en memoria (worklist_service).
    pub async fn find_arrived_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WashJob>, AppError> {
        let jobs = sqlx::query_as::<_, WashJob>(
            r#"
            SELECT * FROM wash_jobs
            WHERE arrived_at >= $1 AND arrived_at < $2
            ORDER BY arrived_at
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<WashJob>, AppError> {
        let jobs = sqlx::query_as::<_, WashJob>(
            "SELECT * FROM wash_jobs WHERE vehicle_id = $1 ORDER BY arrived_at DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    /// Cantidad de lavados de un vehículo con llegada dentro de [from, to)
    pub async fn count_for_vehicle_between(
        &self,
        vehicle_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM wash_jobs
            WHERE vehicle_id = $1 AND arrived_at >= $2 AND arrived_at < $3
            "#,
        )
        .bind(vehicle_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn count_arrived_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM wash_jobs WHERE arrived_at >= $1 AND arrived_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn count_completed_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM wash_jobs
            WHERE arrived_at >= $1 AND arrived_at < $2 AND completed_at IS NOT NULL
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(&self, job: &WashJob) -> Result<WashJob, AppError> {
        let updated = sqlx::query_as::<_, WashJob>(
            r#"
            UPDATE wash_jobs
            SET arrived_at = $2, bay_entered_at = $3, completed_at = $4,
                external_staff_id = $5, internal_staff_id = $6, note = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(job.arrived_at)
        .bind(job.bay_entered_at)
        .bind(job.completed_at)
        .bind(job.external_staff_id)
        .bind(job.internal_staff_id)
        .bind(job.note.clone())
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM wash_jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lavados terminados del período con las etiquetas del vehículo,
    /// para el dashboard BI y el export CSV. Ventana opcional por llegada.
    pub async fn find_report_rows(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<ReportRow>, AppError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT v.license_plate,
                   v.owner_name,
                   c.name AS category_name,
                   p.name AS plan_name,
                   s.name AS external_staff_name,
                   w.arrived_at,
                   w.bay_entered_at,
                   w.completed_at
            FROM wash_jobs w
            JOIN vehicles v ON v.id = w.vehicle_id
            LEFT JOIN categories c ON c.id = v.category_id
            LEFT JOIN plans p ON p.id = v.plan_id
            LEFT JOIN staff s ON s.id = w.external_staff_id
            WHERE w.completed_at IS NOT NULL
              AND ($1::timestamptz IS NULL OR w.arrived_at >= $1)
              AND ($2::timestamptz IS NULL OR w.arrived_at < $2)
            ORDER BY w.arrived_at
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
