use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{DashboardQuery, DashboardSummaryResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard_summary))
        .route("/export-csv", get(export_csv))
}

async fn dashboard_summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSummaryResponse>, AppError> {
    let controller = DashboardController::new(&state);
    let response = controller.summary(query).await?;
    Ok(Json(response))
}

async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let controller = DashboardController::new(&state);
    let csv = controller.export_csv(query).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"lavados.csv\"",
            ),
        ],
        csv,
    ))
}
