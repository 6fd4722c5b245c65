use std::sync::Arc;

use chrono::FixedOffset;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDetailsResponse, VehicleResponse,
};
use crate::dto::wash_job_dto::WashJobResponse;
use crate::dto::ApiResponse;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::repositories::wash_job_repository::WashJobRepository;
use crate::services::clock::Clock;
use crate::services::quota_service::{current_month_bounds, remaining_washes};
use crate::state::AppState;
use crate::utils::errors::{field_error, AppError};
use crate::utils::validation::{normalize_license_plate, validate_license_plate};

pub struct VehicleController {
    vehicles: VehicleRepository,
    jobs: WashJobRepository,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: VehicleRepository::new(state.pool.clone()),
            jobs: WashJobRepository::new(state.pool.clone()),
            clock: state.clock.clone(),
            offset: state.config.utc_offset,
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;
        validate_license_plate(&request.license_plate)
            .map_err(|e| field_error("license_plate", e))?;

        let license_plate = normalize_license_plate(&request.license_plate);

        // Verificar que la matrícula no exista
        if self.vehicles.license_plate_exists(&license_plate).await? {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .create(
                license_plate,
                request.owner_name,
                request.owner_phone,
                request.brand,
                request.model,
                request.category_id,
                request.plan_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    /// Pantalla de detalles: vehículo con etiquetas resueltas, historial de
    /// lavados (llegadas más recientes primero) y saldo mensual si hay plan
    pub async fn get_details(&self, id: Uuid) -> Result<VehicleDetailsResponse, AppError> {
        let detail = self
            .vehicles
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let washes = self
            .jobs
            .find_by_vehicle(id)
            .await?
            .iter()
            .map(|job| WashJobResponse::from_job(job, self.offset))
            .collect();

        let remaining_monthly_washes = match detail.wash_allowance {
            Some(allowance) => {
                let (from, to) = current_month_bounds(self.clock.now_utc(), self.offset);
                let used = self.jobs.count_for_vehicle_between(id, from, to).await?;
                Some(remaining_washes(allowance, used))
            }
            None => None,
        };

        Ok(VehicleDetailsResponse {
            id: detail.id,
            license_plate: detail.license_plate,
            owner_name: detail.owner_name,
            owner_phone: detail.owner_phone,
            brand: detail.brand,
            model: detail.model,
            category: detail.category_name,
            plan: detail.plan_name,
            remaining_monthly_washes,
            washes,
        })
    }

    pub async fn search(&self, term: &str) -> Result<Vec<VehicleResponse>, AppError> {
        if term.trim().is_empty() {
            return Err(AppError::BadRequest(
                "El término de búsqueda es requerido".to_string(),
            ));
        }

        let vehicles = self.vehicles.search(term).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let current = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let license_plate = match request.license_plate.as_deref() {
            Some(value) => {
                validate_license_plate(value).map_err(|e| field_error("license_plate", e))?;
                let normalized = normalize_license_plate(value);
                if normalized != current.license_plate
                    && self.vehicles.license_plate_exists(&normalized).await?
                {
                    return Err(AppError::Conflict(
                        "La matrícula ya está registrada".to_string(),
                    ));
                }
                Some(normalized)
            }
            None => None,
        };

        let vehicle = self
            .vehicles
            .update(
                id,
                license_plate,
                request.owner_name,
                request.owner_phone,
                request.brand,
                request.model,
                request.category_id,
                request.plan_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.vehicles.delete(id).await?;
        Ok(())
    }
}
