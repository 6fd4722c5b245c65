//! Modelo de Plan
//!
//! Un plan define el cupo mensual de lavados de un vehículo
//! (`wash_allowance`). Solo lectura desde este backend.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Plan de lavados - mapea a la tabla plans
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub wash_allowance: i32,
}
