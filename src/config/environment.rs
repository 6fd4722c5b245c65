//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use chrono::FixedOffset;
use std::env;

use crate::utils::validation::parse_utc_offset;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Offset fijo del negocio, ej. "-04:00". Todos los cortes de día y de
    /// mes se calculan en esta zona.
    pub utc_offset: FixedOffset,
    /// Si está activo, registrar un lavado rechaza cuando el plan mensual
    /// del vehículo ya se agotó.
    pub enforce_monthly_quota: bool,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            utc_offset: env::var("UTC_OFFSET")
                .ok()
                .and_then(|v| parse_utc_offset(&v))
                .unwrap_or_else(default_utc_offset),
            enforce_monthly_quota: env::var("ENFORCE_MONTHLY_QUOTA")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_utc_offset() -> FixedOffset {
    // -04:00, la zona del negocio
    FixedOffset::west_opt(4 * 3600).unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_offset_is_minus_four_hours() {
        assert_eq!(default_utc_offset().local_minus_utc(), -4 * 3600);
    }
}
