use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::wash_job_controller::WashJobController;
use crate::dto::wash_job_dto::{
    CompleteWashJobRequest, CreateWashJobRequest, EnterBayRequest, TodayOverviewResponse,
    UpdateWashJobRequest, WashJobResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_wash_job_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_wash_job))
        .route("/today", get(today_overview))
        .route("/:id", get(get_wash_job))
        .route("/:id", put(update_wash_job))
        .route("/:id", delete(delete_wash_job))
        .route("/:id/enter-bay", post(enter_bay))
        .route("/:id/complete", post(complete_wash_job))
}

async fn create_wash_job(
    State(state): State<AppState>,
    Json(request): Json<CreateWashJobRequest>,
) -> Result<Json<ApiResponse<WashJobResponse>>, AppError> {
    let controller = WashJobController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn today_overview(
    State(state): State<AppState>,
) -> Result<Json<TodayOverviewResponse>, AppError> {
    let controller = WashJobController::new(&state);
    let response = controller.today().await?;
    Ok(Json(response))
}

async fn get_wash_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WashJobResponse>, AppError> {
    let controller = WashJobController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_wash_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWashJobRequest>,
) -> Result<Json<ApiResponse<WashJobResponse>>, AppError> {
    let controller = WashJobController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn enter_bay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EnterBayRequest>,
) -> Result<Json<ApiResponse<WashJobResponse>>, AppError> {
    let controller = WashJobController::new(&state);
    let response = controller.enter_bay(id, request).await?;
    Ok(Json(response))
}

async fn complete_wash_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteWashJobRequest>,
) -> Result<Json<ApiResponse<WashJobResponse>>, AppError> {
    let controller = WashJobController::new(&state);
    let response = controller.complete(id, request).await?;
    Ok(Json(response))
}

async fn delete_wash_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = WashJobController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Lavado eliminado exitosamente"
    })))
}
