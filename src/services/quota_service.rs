//! Servicio de cuota mensual
//!
//! Política de cupo mensual de lavados por vehículo. El chequeo existió en
//! el negocio y luego fue desactivado, así que acá es una estrategia
//! conectable: ambos comportamientos quedan alcanzables por tests y por
//! configuración (`ENFORCE_MONTHLY_QUOTA`).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::utils::errors::{quota_exceeded_error, AppResult};

/// Política de cuota mensual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaPolicy {
    /// Comportamiento actual: el cupo no se chequea al crear lavados
    Disabled,
    /// Comportamiento histórico: rechazar cuando el cupo del mes se agotó
    Enforced,
}

impl QuotaPolicy {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            QuotaPolicy::Enforced
        } else {
            QuotaPolicy::Disabled
        }
    }
}

/// Límites UTC del mes calendario local que contiene a `at`.
///
/// Mes calendario, no ventana rodante de 30 días.
pub fn month_bounds(at: DateTime<Utc>, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_date = at.with_timezone(&offset).date_naive();
    let first = NaiveDate::from_ymd_opt(local_date.year(), local_date.month(), 1).unwrap();
    let next = if local_date.month() == 12 {
        NaiveDate::from_ymd_opt(local_date.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(local_date.year(), local_date.month() + 1, 1).unwrap()
    };

    let to_utc = |date: NaiveDate| {
        offset
            .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    };

    (to_utc(first), to_utc(next))
}

/// Chequear el cupo mensual antes de registrar un lavado.
///
/// `used` es la cantidad de lavados del vehículo cuyo `arrived_at` cae en el
/// mes; con la política activa, `used >= allowance` rechaza la creación.
pub fn check_monthly_quota(
    policy: QuotaPolicy,
    used: i64,
    allowance: i32,
    license_plate: &str,
) -> AppResult<()> {
    match policy {
        QuotaPolicy::Disabled => Ok(()),
        QuotaPolicy::Enforced => {
            if used >= allowance as i64 {
                Err(quota_exceeded_error(license_plate, allowance))
            } else {
                Ok(())
            }
        }
    }
}

/// Lavados restantes del mes según el plan del vehículo
pub fn remaining_washes(allowance: i32, used: i64) -> i64 {
    allowance as i64 - used
}

/// Ventana del mes que está corriendo ahora
pub fn current_month_bounds(
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> (DateTime<Utc>, DateTime<Utc>) {
    month_bounds(now, offset)
}
