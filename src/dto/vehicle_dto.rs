use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::wash_job_dto::WashJobResponse;
use crate::models::vehicle::Vehicle;

// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub license_plate: String,

    #[validate(length(min = 2, max = 200))]
    pub owner_name: String,

    #[validate(length(min = 8, max = 20))]
    pub owner_phone: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub category_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
}

// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    pub license_plate: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub owner_name: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub owner_phone: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub category_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
}

// Query del popup de búsqueda
#[derive(Debug, Deserialize)]
pub struct VehicleSearchQuery {
    pub term: Option<String>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub license_plate: String,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            license_plate: vehicle.license_plate,
            owner_name: vehicle.owner_name,
            owner_phone: vehicle.owner_phone,
            brand: vehicle.brand,
            model: vehicle.model,
            category_id: vehicle.category_id,
            plan_id: vehicle.plan_id,
            created_at: vehicle.created_at,
        }
    }
}

// Response de la pantalla de detalles: vehículo + historial de lavados +
// lavados restantes del mes cuando tiene plan
#[derive(Debug, Serialize)]
pub struct VehicleDetailsResponse {
    pub id: Uuid,
    pub license_plate: String,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub plan: Option<String>,
    pub remaining_monthly_washes: Option<i64>,
    pub washes: Vec<WashJobResponse>,
}
