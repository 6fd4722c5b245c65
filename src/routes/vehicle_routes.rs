use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDetailsResponse, VehicleResponse,
    VehicleSearchQuery,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/search", get(search_vehicles))
        .route("/:id", get(get_vehicle_details))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleSearchQuery>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.search(&query.term.unwrap_or_default()).await?;
    Ok(Json(response))
}

async fn get_vehicle_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleDetailsResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_details(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}
