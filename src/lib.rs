//! Backend de gestión para un autolavado: fila del día, vehículos,
//! colaboradores, dashboard y export CSV.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use state::AppState;

/// Router completo de la API, sin estado aplicado
pub fn create_app_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/wash-job", routes::wash_job_routes::create_wash_job_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/staff", routes::staff_routes::create_staff_router())
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(),
        )
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "carwash-backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
