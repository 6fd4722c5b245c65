use std::sync::Arc;

use chrono::FixedOffset;
use uuid::Uuid;

use crate::dto::wash_job_dto::{
    CompleteWashJobRequest, CreateWashJobRequest, EnterBayRequest, TodayOverviewResponse,
    UpdateWashJobRequest, WashJobResponse,
};
use crate::dto::ApiResponse;
use crate::models::wash_job::WashJob;
use crate::repositories::plan_repository::PlanRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::repositories::wash_job_repository::WashJobRepository;
use crate::services::clock::Clock;
use crate::services::quota_service::{check_monthly_quota, month_bounds, QuotaPolicy};
use crate::services::worklist_service::{daily_tally, day_bounds, sort_worklist};
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::parse_local_datetime;

pub struct WashJobController {
    jobs: WashJobRepository,
    vehicles: VehicleRepository,
    plans: PlanRepository,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
    quota_policy: QuotaPolicy,
}

impl WashJobController {
    pub fn new(state: &AppState) -> Self {
        Self {
            jobs: WashJobRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            plans: PlanRepository::new(state.pool.clone()),
            clock: state.clock.clone(),
            offset: state.config.utc_offset,
            quota_policy: QuotaPolicy::from_flag(state.config.enforce_monthly_quota),
        }
    }

    async fn find_job(&self, id: Uuid) -> Result<WashJob, AppError> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lavado no encontrado".to_string()))
    }

    /// Registrar la llegada de un vehículo a la fila.
    ///
    /// La hora de llegada es estricta: un timestamp malformado rechaza el
    /// request. El hook de cuota solo corre si el vehículo tiene plan.
    pub async fn create(
        &self,
        request: CreateWashJobRequest,
    ) -> Result<ApiResponse<WashJobResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let arrived_at = match request.arrived_at.as_deref() {
            Some(value) => parse_local_datetime(value, self.offset).map_err(|_| {
                validation_error("arrived_at", "Formato inválido, se espera YYYY-MM-DDTHH:MM")
            })?,
            None => self.clock.now_utc(),
        };

        if let Some(plan) = self.plans.find_for_vehicle(vehicle.id).await? {
            let (from, to) = month_bounds(arrived_at, self.offset);
            let used = self
                .jobs
                .count_for_vehicle_between(vehicle.id, from, to)
                .await?;
            check_monthly_quota(
                self.quota_policy,
                used,
                plan.wash_allowance,
                &vehicle.license_plate,
            )?;
        }

        let job = self
            .jobs
            .create(vehicle.id, arrived_at, request.note)
            .await?;

        Ok(ApiResponse::success_with_message(
            WashJobResponse::from_job(&job, self.offset),
            "Lavado registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<WashJobResponse, AppError> {
        let job = self.find_job(id).await?;
        Ok(WashJobResponse::from_job(&job, self.offset))
    }

    /// Pantalla de acompañamiento: lavados cuyo `arrived_at` cae en el día
    /// calendario local actual, ordenados para el worklist, con los conteos
    /// por estado.
    pub async fn today(&self) -> Result<TodayOverviewResponse, AppError> {
        let (from, to) = day_bounds(self.clock.now_utc(), self.offset);
        let mut jobs = self.jobs.find_arrived_between(from, to).await?;
        sort_worklist(&mut jobs);

        let stats = daily_tally(&jobs);
        let washes = jobs
            .iter()
            .map(|job| WashJobResponse::from_job(job, self.offset))
            .collect();

        Ok(TodayOverviewResponse { stats, washes })
    }

    /// Mover un lavado a pista.
    ///
    /// Sin precondición de estado: repetir la operación sobrescribe
    /// `bay_entered_at` y los slots de colaboradores. Hora malformada o
    /// ausente cae a "ahora" (tolerancia deliberada del popup).
    pub async fn enter_bay(
        &self,
        id: Uuid,
        request: EnterBayRequest,
    ) -> Result<ApiResponse<WashJobResponse>, AppError> {
        let mut job = self.find_job(id).await?;

        let at = request
            .at
            .as_deref()
            .and_then(|value| parse_local_datetime(value, self.offset).ok())
            .unwrap_or_else(|| self.clock.now_utc());

        job.enter_bay(at, request.external_staff_id, request.internal_staff_id);
        let updated = self.jobs.update(&job).await?;

        Ok(ApiResponse::success_with_message(
            WashJobResponse::from_job(&updated, self.offset),
            "Lavado movido a pista".to_string(),
        ))
    }

    /// Finalizar un lavado. Misma tolerancia de hora que `enter_bay`;
    /// tampoco exige que haya entrado a pista.
    pub async fn complete(
        &self,
        id: Uuid,
        request: CompleteWashJobRequest,
    ) -> Result<ApiResponse<WashJobResponse>, AppError> {
        let mut job = self.find_job(id).await?;

        let at = request
            .at
            .as_deref()
            .and_then(|value| parse_local_datetime(value, self.offset).ok())
            .unwrap_or_else(|| self.clock.now_utc());

        job.complete(at);
        let updated = self.jobs.update(&job).await?;

        Ok(ApiResponse::success_with_message(
            WashJobResponse::from_job(&updated, self.offset),
            "Lavado finalizado".to_string(),
        ))
    }

    /// Edición desde el popup: solo los campos enviados cambian y los
    /// timestamps se validan estrictos.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateWashJobRequest,
    ) -> Result<ApiResponse<WashJobResponse>, AppError> {
        let mut job = self.find_job(id).await?;

        if let Some(value) = request.arrived_at.as_deref() {
            job.arrived_at = parse_local_datetime(value, self.offset).map_err(|_| {
                validation_error("arrived_at", "Formato inválido, se espera YYYY-MM-DDTHH:MM")
            })?;
        }
        if let Some(value) = request.bay_entered_at.as_deref() {
            job.bay_entered_at = Some(parse_local_datetime(value, self.offset).map_err(|_| {
                validation_error("bay_entered_at", "Formato inválido, se espera YYYY-MM-DDTHH:MM")
            })?);
        }
        if let Some(value) = request.completed_at.as_deref() {
            job.completed_at = Some(parse_local_datetime(value, self.offset).map_err(|_| {
                validation_error("completed_at", "Formato inválido, se espera YYYY-MM-DDTHH:MM")
            })?);
        }
        if request.external_staff_id.is_some() {
            job.external_staff_id = request.external_staff_id;
        }
        if request.internal_staff_id.is_some() {
            job.internal_staff_id = request.internal_staff_id;
        }
        if request.note.is_some() {
            job.note = request.note;
        }

        let updated = self.jobs.update(&job).await?;

        Ok(ApiResponse::success_with_message(
            WashJobResponse::from_job(&updated, self.offset),
            "Lavado actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.find_job(id).await?;
        self.jobs.delete(id).await?;
        Ok(())
    }
}
