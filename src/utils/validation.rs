//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión entre el formato de hora local del wire y UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Formato de fecha/hora local usado por los popups del frontend
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

lazy_static! {
    // Matrículas brasileñas: ABC1234 o Mercosur ABC1D23, con guión opcional
    static ref LICENSE_PLATE_RE: Regex =
        Regex::new(r"^[A-Z]{3}-?\d[A-Z0-9]\d{2}$").unwrap();
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_uppercase();
    if !LICENSE_PLATE_RE.is_match(&normalized) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"AAA9999 or AAA9A99".to_string());
        return Err(error);
    }
    Ok(())
}

/// Normalizar una matrícula para almacenamiento (mayúsculas, sin guión)
pub fn normalize_license_plate(value: &str) -> String {
    value.trim().to_uppercase().replace('-', "")
}

/// Validar y convertir string a fecha
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Convertir un timestamp local del wire (`YYYY-MM-DDTHH:MM`) a un instante UTC
/// usando el offset configurado del servidor
pub fn parse_local_datetime(
    value: &str,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, ValidationError> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), LOCAL_DATETIME_FORMAT).map_err(|_| {
        let mut error = ValidationError::new("datetime");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DDTHH:MM".to_string());
        error
    })?;

    // Con FixedOffset la conversión local -> absoluto nunca es ambigua
    let local = offset.from_local_datetime(&naive).single().ok_or_else(|| {
        let mut error = ValidationError::new("datetime");
        error.add_param("value".into(), &value.to_string());
        error
    })?;

    Ok(local.with_timezone(&Utc))
}

/// Renderizar un instante UTC en el formato local del wire
pub fn format_local_datetime(value: DateTime<Utc>, offset: FixedOffset) -> String {
    value
        .with_timezone(&offset)
        .format(LOCAL_DATETIME_FORMAT)
        .to_string()
}

/// Parsear un offset UTC con formato `±HH:MM` (ej: "-04:00")
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    // Solo ASCII: los cortes por byte de abajo requieren un char por byte
    if value.len() != 6 || !value.is_ascii() {
        return None;
    }

    let sign = match &value[..1] {
        "+" => 1,
        "-" => -1,
        _ => return None,
    };
    if &value[3..4] != ":" {
        return None;
    }

    let hours: i32 = value[1..3].parse().ok()?;
    let minutes: i32 = value[4..6].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("ABC1234").is_ok());
        assert!(validate_license_plate("abc1234").is_ok());
        assert!(validate_license_plate("ABC-1234").is_ok());
        assert!(validate_license_plate("ABC1D23").is_ok());
        assert!(validate_license_plate("AB1234").is_err());
        assert!(validate_license_plate("ABCD123").is_err());
        assert!(validate_license_plate("").is_err());
    }

    #[test]
    fn test_normalize_license_plate() {
        assert_eq!(normalize_license_plate(" abc-1234 "), "ABC1234");
        assert_eq!(normalize_license_plate("XYZ9A87"), "XYZ9A87");
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-01-15").is_ok());
        assert!(parse_date("2025/01/15").is_err());
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(
            parse_utc_offset("-04:00"),
            FixedOffset::west_opt(4 * 3600)
        );
        assert_eq!(
            parse_utc_offset("+05:30"),
            FixedOffset::east_opt(5 * 3600 + 30 * 60)
        );
        assert!(parse_utc_offset("04:00").is_none());
        assert!(parse_utc_offset("-4:00").is_none());
        assert!(parse_utc_offset("-25:00").is_none());
        // multi-byte con 6 bytes totales no debe panickear
        assert!(parse_utc_offset("é4:00").is_none());
        assert!(parse_utc_offset("-04:0é").is_none());
    }

    #[test]
    fn test_parse_local_datetime_applies_offset() {
        let offset = FixedOffset::west_opt(4 * 3600).unwrap();
        let parsed = parse_local_datetime("2025-01-01T08:00", offset).unwrap();
        // 08:00 en UTC-4 son las 12:00 UTC
        assert_eq!(parsed.hour(), 12);
    }

    #[test]
    fn test_parse_local_datetime_malformed() {
        let offset = FixedOffset::west_opt(4 * 3600).unwrap();
        assert!(parse_local_datetime("01/01/2025 08:00", offset).is_err());
        assert!(parse_local_datetime("", offset).is_err());
    }

    #[test]
    fn test_format_local_datetime_roundtrip() {
        let offset = FixedOffset::west_opt(4 * 3600).unwrap();
        let parsed = parse_local_datetime("2025-03-10T15:45", offset).unwrap();
        assert_eq!(format_local_datetime(parsed, offset), "2025-03-10T15:45");
    }
}
