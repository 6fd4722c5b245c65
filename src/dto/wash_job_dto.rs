use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::wash_job::{format_duration, WashJob};
use crate::services::worklist_service::WorklistStats;
use crate::utils::validation::format_local_datetime;

// Request para registrar un lavado (llegada a la fila)
#[derive(Debug, Deserialize)]
pub struct CreateWashJobRequest {
    pub vehicle_id: Uuid,
    /// Hora local `YYYY-MM-DDTHH:MM`; ausente = ahora
    pub arrived_at: Option<String>,
    pub note: Option<String>,
}

// Request para mover un lavado a pista
#[derive(Debug, Deserialize)]
pub struct EnterBayRequest {
    /// Hora local; ausente o inválida = ahora
    pub at: Option<String>,
    pub external_staff_id: Option<Uuid>,
    pub internal_staff_id: Option<Uuid>,
}

// Request para finalizar un lavado
#[derive(Debug, Deserialize)]
pub struct CompleteWashJobRequest {
    pub at: Option<String>,
}

// Request del popup de edición: solo los campos enviados cambian
#[derive(Debug, Deserialize)]
pub struct UpdateWashJobRequest {
    pub arrived_at: Option<String>,
    pub bay_entered_at: Option<String>,
    pub completed_at: Option<String>,
    pub external_staff_id: Option<Uuid>,
    pub internal_staff_id: Option<Uuid>,
    pub note: Option<String>,
}

// Response de lavado con estado derivado, horarios en hora local y
// duraciones formateadas H:MM
#[derive(Debug, Serialize)]
pub struct WashJobResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub status: String,
    pub arrived_at: String,
    pub bay_entered_at: Option<String>,
    pub completed_at: Option<String>,
    pub external_staff_id: Option<Uuid>,
    pub internal_staff_id: Option<Uuid>,
    pub note: Option<String>,
    pub queue_time: String,
    pub bay_time: String,
    pub total_time: String,
}

impl WashJobResponse {
    pub fn from_job(job: &WashJob, offset: FixedOffset) -> Self {
        Self {
            id: job.id,
            vehicle_id: job.vehicle_id,
            status: job.status().as_str().to_string(),
            arrived_at: format_local_datetime(job.arrived_at, offset),
            bay_entered_at: job.bay_entered_at.map(|at| format_local_datetime(at, offset)),
            completed_at: job.completed_at.map(|at| format_local_datetime(at, offset)),
            external_staff_id: job.external_staff_id,
            internal_staff_id: job.internal_staff_id,
            note: job.note.clone(),
            queue_time: format_duration(job.queue_duration()),
            bay_time: format_duration(job.bay_duration()),
            total_time: format_duration(job.total_duration()),
        }
    }
}

// Response de la pantalla de acompañamiento del día
#[derive(Debug, Serialize)]
pub struct TodayOverviewResponse {
    pub stats: WorklistStats,
    pub washes: Vec<WashJobResponse>,
}
