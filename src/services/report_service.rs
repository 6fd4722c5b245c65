//! Servicio de export CSV
//!
//! Genera el CSV del dashboard BI: una fila por lavado terminado con los
//! datos del vehículo y la fecha de salida en hora local.

use chrono::FixedOffset;

use crate::repositories::wash_job_repository::ReportRow;

pub const CSV_HEADER: &str = "license_plate,owner_name,category,plan,completed_at";

const LOCAL_REPORT_FORMAT: &str = "%d/%m/%Y %H:%M";

fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Construir el CSV completo (header + una fila por lavado)
pub fn build_csv(rows: &[ReportRow], offset: FixedOffset) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for row in rows {
        let completed_local = row
            .completed_at
            .with_timezone(&offset)
            .format(LOCAL_REPORT_FORMAT)
            .to_string();

        let fields = [
            escape_field(&row.license_plate),
            escape_field(&row.owner_name),
            escape_field(row.category_name.as_deref().unwrap_or("")),
            escape_field(row.plan_name.as_deref().unwrap_or("")),
            completed_local,
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }

    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn offset() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    fn row(owner_name: &str, category: Option<&str>) -> ReportRow {
        ReportRow {
            license_plate: "ABC1234".to_string(),
            owner_name: owner_name.to_string(),
            category_name: category.map(|c| c.to_string()),
            plan_name: Some("Mensal".to_string()),
            external_staff_name: None,
            arrived_at: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
            bay_entered_at: None,
            completed_at: Utc.with_ymd_and_hms(2025, 3, 10, 13, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_build_csv_header_and_rows() {
        let csv = build_csv(&[row("Cliente Teste", Some("SUV"))], offset());
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some(CSV_HEADER));
        // 13:30 UTC son las 09:30 locales en UTC-4
        assert_eq!(
            lines.next(),
            Some("ABC1234,Cliente Teste,SUV,Mensal,10/03/2025 09:30")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_build_csv_empty_category() {
        let csv = build_csv(&[row("Cliente", None)], offset());
        assert!(csv.contains("ABC1234,Cliente,,Mensal,"));
    }

    #[test]
    fn test_build_csv_escapes_commas_and_quotes() {
        let csv = build_csv(&[row("Silva, João \"Jota\"", None)], offset());
        assert!(csv.contains("\"Silva, João \"\"Jota\"\"\""));
    }
}
