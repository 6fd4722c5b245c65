use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::staff_controller::StaffController;
use crate::dto::staff_dto::{CreateStaffRequest, StaffListQuery, StaffResponse, UpdateStaffRequest};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_staff_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_staff))
        .route("/", get(list_staff))
        .route("/:id", put(update_staff))
}

async fn create_staff(
    State(state): State<AppState>,
    Json(request): Json<CreateStaffRequest>,
) -> Result<Json<ApiResponse<StaffResponse>>, AppError> {
    let controller = StaffController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_staff(
    State(state): State<AppState>,
    Query(query): Query<StaffListQuery>,
) -> Result<Json<Vec<StaffResponse>>, AppError> {
    let controller = StaffController::new(&state);
    let response = controller.list(query.active).await?;
    Ok(Json(response))
}

async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStaffRequest>,
) -> Result<Json<ApiResponse<StaffResponse>>, AppError> {
    let controller = StaffController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}
