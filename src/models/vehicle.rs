//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del registro de clientes.
//! Mapea exactamente a la tabla vehicles del schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehículo registrado - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
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

/// Vehículo con las etiquetas de categoría y plan resueltas por JOIN,
/// para la pantalla de detalles y el reporting
#[derive(Debug, Clone, FromRow)]
pub struct VehicleDetailRow {
    pub id: Uuid,
    pub license_plate: String,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_name: Option<String>,
    pub plan_name: Option<String>,
    pub wash_allowance: Option<i32>,
    pub created_at: DateTime<Utc>,
}
