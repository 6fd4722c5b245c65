use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::staff::Staff;

// Request para registrar un colaborador
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaffRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
}

// Request para renombrar o activar/desactivar un colaborador
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStaffRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    pub active: Option<bool>,
}

// Query de listado: `active=true` limita a los asignables
#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    pub active: Option<bool>,
}

// Response de colaborador
#[derive(Debug, Serialize)]
pub struct StaffResponse {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Staff> for StaffResponse {
    fn from(staff: Staff) -> Self {
        Self {
            id: staff.id,
            name: staff.name,
            active: staff.active,
            created_at: staff.created_at,
        }
    }
}
