//! Modelo de Staff (colaboradores)
//!
//! Solo los colaboradores activos se ofrecen para asignar a lavados nuevos;
//! los inactivos siguen visibles en los lavados históricos que los referencian.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Colaborador - mapea a la tabla staff
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Staff {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
