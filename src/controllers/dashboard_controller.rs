use std::sync::Arc;

use chrono::FixedOffset;

use crate::dto::dashboard_dto::{DashboardQuery, DashboardSummaryResponse};
use crate::repositories::wash_job_repository::WashJobRepository;
use crate::services::clock::Clock;
use crate::services::dashboard_service::{
    category_breakdown, indicators, resolve_period, staff_productivity, washes_per_day,
};
use crate::services::report_service::build_csv;
use crate::services::worklist_service::day_bounds;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DashboardController {
    jobs: WashJobRepository,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl DashboardController {
    pub fn new(state: &AppState) -> Self {
        Self {
            jobs: WashJobRepository::new(state.pool.clone()),
            clock: state.clock.clone(),
            offset: state.config.utc_offset,
        }
    }

    /// Dashboard BI sobre lavados terminados del período
    pub async fn summary(
        &self,
        query: DashboardQuery,
    ) -> Result<DashboardSummaryResponse, AppError> {
        let now = self.clock.now_utc();
        let period = resolve_period(
            query.days.as_deref(),
            query.date_from.as_deref(),
            query.date_to.as_deref(),
            now,
            self.offset,
        );

        let rows = self.jobs.find_report_rows(period.from, period.to).await?;

        let (today_from, today_to) = day_bounds(now, self.offset);
        let washes_today = self.jobs.count_arrived_between(today_from, today_to).await?;
        let completed_today = self
            .jobs
            .count_completed_between(today_from, today_to)
            .await?;

        Ok(DashboardSummaryResponse {
            period_label: period.label,
            indicators: indicators(&rows),
            washes_per_day: washes_per_day(&rows, now, self.offset, period.chart_days),
            staff_productivity: staff_productivity(&rows),
            categories: category_breakdown(&rows),
            washes_today,
            completed_today,
        })
    }

    /// Export CSV del mismo período que el dashboard
    pub async fn export_csv(&self, query: DashboardQuery) -> Result<String, AppError> {
        let now = self.clock.now_utc();
        let period = resolve_period(
            query.days.as_deref(),
            query.date_from.as_deref(),
            query.date_to.as_deref(),
            now,
            self.offset,
        );

        let rows = self.jobs.find_report_rows(period.from, period.to).await?;
        Ok(build_csv(&rows, self.offset))
    }
}
