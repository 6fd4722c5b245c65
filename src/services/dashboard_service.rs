//! Servicio del dashboard BI
//!
//! Indicadores y análisis sobre lavados terminados: promedios de tiempos,
//! serie de lavados por día y desglose por categoría. Todo se computa en
//! memoria sobre las filas que trae el repositorio de reporting.

use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;

use crate::models::wash_job::format_duration;
use crate::repositories::wash_job_repository::ReportRow;
use crate::utils::validation::parse_date;

/// Límite de días del gráfico para el modo "todo el período"
pub const MAX_CHART_DAYS: i64 = 90;

const DEFAULT_PERIOD_DAYS: i64 = 30;

const MAX_PERIOD_DAYS: i64 = 36500;

/// Ventana temporal resuelta para el dashboard y el export
#[derive(Debug, Clone)]
pub struct PeriodFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub label: String,
    /// `None` cuando el período es "todo": el gráfico se dimensiona
    /// según los datos, con tope de MAX_CHART_DAYS
    pub chart_days: Option<i64>,
}

/// Resolver el período a partir de los parámetros del request.
///
/// Prioridad: rango custom de fechas (`%Y-%m-%d`, límites de día local);
/// si falta o es inválido, filtro predefinido de N días (default 30) o
/// "all" para todo el período. Rango custom inválido cae al default, igual
/// que el comportamiento histórico de la pantalla.
pub fn resolve_period(
    days: Option<&str>,
    date_from: Option<&str>,
    date_to: Option<&str>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> PeriodFilter {
    use chrono::TimeZone;

    if let (Some(from_str), Some(to_str)) = (date_from, date_to) {
        if let (Ok(from_date), Ok(to_date)) = (parse_date(from_str), parse_date(to_str)) {
            if from_date <= to_date {
                let to_utc = |d: chrono::NaiveDate| {
                    offset
                        .from_local_datetime(&d.and_hms_opt(0, 0, 0).unwrap())
                        .unwrap()
                        .with_timezone(&Utc)
                };
                let span_days = (to_date - from_date).num_days() + 1;
                return PeriodFilter {
                    from: Some(to_utc(from_date)),
                    to: Some(to_utc(to_date) + Duration::days(1)),
                    label: format!(
                        "{} hasta {}",
                        from_date.format("%d/%m/%Y"),
                        to_date.format("%d/%m/%Y")
                    ),
                    chart_days: Some(span_days.min(MAX_CHART_DAYS)),
                };
            }
        }
    }

    match days {
        Some("all") | Some("tudo") => PeriodFilter {
            from: None,
            to: None,
            label: "Todo el período".to_string(),
            chart_days: None,
        },
        other => {
            // Tope de 100 años: valores absurdos del query string caen al
            // default en vez de desbordar la aritmética de fechas
            let n = other
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|n| (1..=MAX_PERIOD_DAYS).contains(n))
                .unwrap_or(DEFAULT_PERIOD_DAYS);
            PeriodFilter {
                from: Some(now - Duration::days(n)),
                to: Some(now),
                label: format!("Últimos {} días", n),
                chart_days: Some(n.min(MAX_CHART_DAYS)),
            }
        }
    }
}

/// Indicadores principales del período
#[derive(Debug, Clone, Serialize)]
pub struct Indicators {
    pub total_washes: i64,
    pub avg_queue_time: String,
    pub avg_bay_time: String,
    pub avg_total_time: String,
}

/// Serie para el gráfico de lavados por día
#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

/// Fila del análisis por categoría
#[derive(Debug, Clone, Serialize)]
pub struct CategoryAnalysis {
    pub category: String,
    pub total_washes: i64,
    pub avg_queue_time: String,
    pub avg_bay_time: String,
    pub avg_total_time: String,
}

fn average(durations: &[Duration]) -> Option<Duration> {
    if durations.is_empty() {
        return None;
    }
    let total: i64 = durations.iter().map(|d| d.num_seconds()).sum();
    Some(Duration::seconds(total / durations.len() as i64))
}

fn collect_durations(rows: &[ReportRow]) -> (Vec<Duration>, Vec<Duration>, Vec<Duration>) {
    let mut queue = Vec::new();
    let mut bay = Vec::new();
    let mut total = Vec::new();

    for row in rows {
        if let Some(entered) = row.bay_entered_at {
            queue.push(entered - row.arrived_at);
            bay.push(row.completed_at - entered);
        }
        total.push(row.completed_at - row.arrived_at);
    }

    (queue, bay, total)
}

/// Indicadores agregados del período (solo lavados terminados)
pub fn indicators(rows: &[ReportRow]) -> Indicators {
    let (queue, bay, total) = collect_durations(rows);

    Indicators {
        total_washes: rows.len() as i64,
        avg_queue_time: format_duration(average(&queue)),
        avg_bay_time: format_duration(average(&bay)),
        avg_total_time: format_duration(average(&total)),
    }
}

/// Serie de lavados por día local, terminando hoy.
///
/// Con `chart_days = None` (período "todo") la ventana se deriva de la
/// primera llegada, con tope de MAX_CHART_DAYS.
pub fn washes_per_day(
    rows: &[ReportRow],
    now: DateTime<Utc>,
    offset: FixedOffset,
    chart_days: Option<i64>,
) -> SeriesData {
    let today = now.with_timezone(&offset).date_naive();

    let days = match chart_days {
        Some(n) => n.max(1),
        None => rows
            .iter()
            .map(|r| r.arrived_at.with_timezone(&offset).date_naive())
            .min()
            .map(|first| ((today - first).num_days() + 1).clamp(1, MAX_CHART_DAYS))
            .unwrap_or(DEFAULT_PERIOD_DAYS),
    };

    let mut counts: HashMap<chrono::NaiveDate, i64> = HashMap::new();
    for row in rows {
        let date = row.arrived_at.with_timezone(&offset).date_naive();
        *counts.entry(date).or_insert(0) += 1;
    }

    let mut labels = Vec::with_capacity(days as usize);
    let mut data = Vec::with_capacity(days as usize);
    for i in 0..days {
        let date = today - Duration::days(days - 1 - i);
        labels.push(date.format("%d/%m").to_string());
        data.push(counts.get(&date).copied().unwrap_or(0));
    }

    SeriesData { labels, data }
}

/// Lavados por colaborador externo, descendente, top 10.
/// Los lavados sin colaborador asignado van en su propio bucket.
pub fn staff_productivity(rows: &[ReportRow]) -> SeriesData {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for row in rows {
        let key = row
            .external_staff_name
            .clone()
            .unwrap_or_else(|| "Sin asignar".to_string());
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut ranking: Vec<(String, i64)> = counts.into_iter().collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranking.truncate(10);

    let (labels, data) = ranking.into_iter().unzip();
    SeriesData { labels, data }
}

/// Desglose por categoría, ordenado por cantidad descendente.
/// Los lavados de vehículos sin categoría van en su propia fila.
pub fn category_breakdown(rows: &[ReportRow]) -> Vec<CategoryAnalysis> {
    let mut groups: HashMap<String, Vec<&ReportRow>> = HashMap::new();
    for row in rows {
        let key = row
            .category_name
            .clone()
            .unwrap_or_else(|| "Sin categoría".to_string());
        groups.entry(key).or_default().push(row);
    }

    let mut analysis: Vec<CategoryAnalysis> = groups
        .into_iter()
        .map(|(category, group)| {
            let owned: Vec<ReportRow> = group.into_iter().cloned().collect();
            let (queue, bay, total) = collect_durations(&owned);
            CategoryAnalysis {
                category,
                total_washes: owned.len() as i64,
                avg_queue_time: format_duration(average(&queue)),
                avg_bay_time: format_duration(average(&bay)),
                avg_total_time: format_duration(average(&total)),
            }
        })
        .collect();

    analysis.sort_by(|a, b| b.total_washes.cmp(&a.total_washes).then(a.category.cmp(&b.category)));
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offset() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    fn row(
        category: Option<&str>,
        arrived: DateTime<Utc>,
        bay: Option<DateTime<Utc>>,
        completed: DateTime<Utc>,
    ) -> ReportRow {
        ReportRow {
            license_plate: "ABC1234".to_string(),
            owner_name: "Cliente".to_string(),
            category_name: category.map(|c| c.to_string()),
            plan_name: None,
            external_staff_name: None,
            arrived_at: arrived,
            bay_entered_at: bay,
            completed_at: completed,
        }
    }

    fn row_by_staff(staff: Option<&str>, arrived: DateTime<Utc>) -> ReportRow {
        ReportRow {
            external_staff_name: staff.map(|s| s.to_string()),
            ..row(None, arrived, None, arrived + Duration::hours(1))
        }
    }

    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, h, m, 0).unwrap()
    }

    #[test]
    fn test_indicators_averages() {
        let rows = vec![
            // fila 20m, pista 40m, total 60m
            row(None, at(10, 12, 0), Some(at(10, 12, 20)), at(10, 13, 0)),
            // fila 40m, pista 20m, total 60m
            row(None, at(11, 12, 0), Some(at(11, 12, 40)), at(11, 13, 0)),
        ];

        let ind = indicators(&rows);
        assert_eq!(ind.total_washes, 2);
        assert_eq!(ind.avg_queue_time, "0:30");
        assert_eq!(ind.avg_bay_time, "0:30");
        assert_eq!(ind.avg_total_time, "1:00");
    }

    #[test]
    fn test_indicators_skip_bay_averages_without_bay_entry() {
        // terminado sin entrada a pista: solo cuenta para el promedio total
        let rows = vec![row(None, at(10, 12, 0), None, at(10, 14, 0))];
        let ind = indicators(&rows);
        assert_eq!(ind.avg_queue_time, "0:00");
        assert_eq!(ind.avg_bay_time, "0:00");
        assert_eq!(ind.avg_total_time, "2:00");
    }

    #[test]
    fn test_indicators_empty() {
        let ind = indicators(&[]);
        assert_eq!(ind.total_washes, 0);
        assert_eq!(ind.avg_total_time, "0:00");
    }

    #[test]
    fn test_washes_per_day_series() {
        let now = at(12, 15, 0);
        let rows = vec![
            row(None, at(12, 12, 0), None, at(12, 13, 0)),
            row(None, at(12, 14, 0), None, at(12, 15, 0)),
            row(None, at(11, 12, 0), None, at(11, 13, 0)),
        ];

        let series = washes_per_day(&rows, now, offset(), Some(3));
        assert_eq!(series.labels, vec!["10/03", "11/03", "12/03"]);
        assert_eq!(series.data, vec![0, 1, 2]);
    }

    #[test]
    fn test_washes_per_day_all_period_derives_window() {
        let now = at(12, 15, 0);
        let rows = vec![row(None, at(10, 12, 0), None, at(10, 13, 0))];

        let series = washes_per_day(&rows, now, offset(), None);
        // del 10/03 al 12/03 inclusive
        assert_eq!(series.labels.len(), 3);
        assert_eq!(series.data.iter().sum::<i64>(), 1);
    }

    #[test]
    fn test_category_breakdown_groups_and_orders() {
        let rows = vec![
            row(Some("SUV"), at(10, 12, 0), Some(at(10, 12, 10)), at(10, 13, 0)),
            row(Some("SUV"), at(11, 12, 0), Some(at(11, 12, 10)), at(11, 13, 0)),
            row(None, at(12, 12, 0), None, at(12, 13, 0)),
        ];

        let analysis = category_breakdown(&rows);
        assert_eq!(analysis.len(), 2);
        assert_eq!(analysis[0].category, "SUV");
        assert_eq!(analysis[0].total_washes, 2);
        assert_eq!(analysis[1].category, "Sin categoría");
        assert_eq!(analysis[1].total_washes, 1);
    }

    #[test]
    fn test_staff_productivity_ranks_and_buckets() {
        let rows = vec![
            row_by_staff(Some("Pedro"), at(10, 12, 0)),
            row_by_staff(Some("Pedro"), at(11, 12, 0)),
            row_by_staff(Some("Ana"), at(12, 12, 0)),
            row_by_staff(None, at(12, 14, 0)),
        ];

        let series = staff_productivity(&rows);
        assert_eq!(series.labels, vec!["Pedro", "Ana", "Sin asignar"]);
        assert_eq!(series.data, vec![2, 1, 1]);
    }

    #[test]
    fn test_staff_productivity_caps_at_top_ten() {
        let mut rows = Vec::new();
        for i in 0..12 {
            rows.push(row_by_staff(Some(&format!("Colaborador {:02}", i)), at(10, 12, 0)));
        }

        let series = staff_productivity(&rows);
        assert_eq!(series.labels.len(), 10);
        assert_eq!(series.data.iter().sum::<i64>(), 10);
    }

    #[test]
    fn test_staff_productivity_empty() {
        let series = staff_productivity(&[]);
        assert!(series.labels.is_empty());
        assert!(series.data.is_empty());
    }

    #[test]
    fn test_resolve_period_custom_range() {
        let now = at(20, 12, 0);
        let period = resolve_period(None, Some("2025-03-01"), Some("2025-03-10"), now, offset());

        assert_eq!(period.label, "01/03/2025 hasta 10/03/2025");
        assert_eq!(period.chart_days, Some(10));
        assert_eq!(
            period.from,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 4, 0, 0).unwrap())
        );
        assert_eq!(
            period.to,
            Some(Utc.with_ymd_and_hms(2025, 3, 11, 4, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_resolve_period_invalid_custom_falls_back() {
        let now = at(20, 12, 0);
        let period = resolve_period(None, Some("01/03/2025"), Some("2025-03-10"), now, offset());
        assert_eq!(period.label, "Últimos 30 días");
        assert_eq!(period.from, Some(now - Duration::days(30)));
    }

    #[test]
    fn test_resolve_period_out_of_range_days_falls_back() {
        let now = at(20, 12, 0);

        // valores fuera de rango no deben desbordar la aritmética de fechas
        for days in ["999999999999", "0", "-7", "abc"] {
            let period = resolve_period(Some(days), None, None, now, offset());
            assert_eq!(period.label, "Últimos 30 días");
            assert_eq!(period.from, Some(now - Duration::days(30)));
        }
    }

    #[test]
    fn test_resolve_period_predefined_and_all() {
        let now = at(20, 12, 0);

        let period = resolve_period(Some("7"), None, None, now, offset());
        assert_eq!(period.label, "Últimos 7 días");
        assert_eq!(period.chart_days, Some(7));

        let all = resolve_period(Some("all"), None, None, now, offset());
        assert_eq!(all.from, None);
        assert_eq!(all.to, None);
        assert_eq!(all.chart_days, None);
    }
}
