use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleDetailRow};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        license_plate: String,
        owner_name: String,
        owner_phone: Option<String>,
        brand: Option<String>,
        model: Option<String>,
        category_id: Option<Uuid>,
        plan_id: Option<Uuid>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, license_plate, owner_name, owner_phone, brand, model, category_id, plan_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(license_plate)
        .bind(owner_name)
        .bind(owner_phone)
        .bind(brand)
        .bind(model)
        .bind(category_id)
        .bind(plan_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Vehículo con nombre de categoría y plan resueltos para la pantalla
    /// de detalles
    pub async fn find_detail(&self, id: Uuid) -> Result<Option<VehicleDetailRow>, AppError> {
        let detail = sqlx::query_as::<_, VehicleDetailRow>(
            r#"
            SELECT v.id,
                   v.license_plate,
                   v.owner_name,
                   v.owner_phone,
                   v.brand,
                   v.model,
                   c.name AS category_name,
                   p.name AS plan_name,
                   p.wash_allowance,
                   v.created_at
            FROM vehicles v
            LEFT JOIN categories c ON c.id = v.category_id
            LEFT JOIN plans p ON p.id = v.plan_id
            WHERE v.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    /// Búsqueda por término contra matrícula o nombre del dueño (popup de
    /// búsqueda del frontend)
    pub async fn search(&self, term: &str) -> Result<Vec<Vehicle>, AppError> {
        let pattern = format!("%{}%", term.trim());
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE license_plate ILIKE $1 OR owner_name ILIKE $1
            ORDER BY owner_name
            LIMIT 20
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn license_plate_exists(&self, license_plate: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1)")
                .bind(license_plate)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        license_plate: Option<String>,
        owner_name: Option<String>,
        owner_phone: Option<String>,
        brand: Option<String>,
        model: Option<String>,
        category_id: Option<Uuid>,
        plan_id: Option<Uuid>,
    ) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET license_plate = $2, owner_name = $3, owner_phone = $4,
                brand = $5, model = $6, category_id = $7, plan_id = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(license_plate.unwrap_or(current.license_plate))
        .bind(owner_name.unwrap_or(current.owner_name))
        .bind(owner_phone.or(current.owner_phone))
        .bind(brand.or(current.brand))
        .bind(model.or(current.model))
        .bind(category_id.or(current.category_id))
        .bind(plan_id.or(current.plan_id))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
