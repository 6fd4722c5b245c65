//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::clock::{Clock, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Estado con reloj inyectado, para tests que fijan "ahora"
    pub fn with_clock(pool: PgPool, config: EnvironmentConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            config,
            clock,
        }
    }
}
