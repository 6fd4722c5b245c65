//! Reloj inyectable
//!
//! Los defaults de timestamps dependen de la hora actual; abstraerla detrás
//! de un trait permite que los tests usen instantes fijos y deterministas.

use chrono::{DateTime, Utc};

/// Fuente de la hora actual del sistema
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Reloj de producción basado en la hora del sistema
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reloj fijo para tests
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_returns_configured_instant() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now_utc(), instant);
        assert_eq!(clock.now_utc(), instant);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now_utc();
        let b = clock.now_utc();
        assert!(b >= a);
    }
}
