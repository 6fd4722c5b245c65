use serde::{Deserialize, Serialize};

use crate::services::dashboard_service::{CategoryAnalysis, Indicators, SeriesData};

// Filtros del dashboard: días predefinidos (7/15/30/60/90/all) o rango
// custom de fechas `YYYY-MM-DD`
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub days: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

// Response del dashboard BI
#[derive(Debug, Serialize)]
pub struct DashboardSummaryResponse {
    pub period_label: String,
    pub indicators: Indicators,
    pub washes_per_day: SeriesData,
    pub staff_productivity: SeriesData,
    pub categories: Vec<CategoryAnalysis>,
    pub washes_today: i64,
    pub completed_today: i64,
}
