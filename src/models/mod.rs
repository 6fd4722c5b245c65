//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod plan;
pub mod staff;
pub mod vehicle;
pub mod wash_job;
