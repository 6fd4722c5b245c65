use uuid::Uuid;
use validator::Validate;

use crate::dto::staff_dto::{CreateStaffRequest, StaffResponse, UpdateStaffRequest};
use crate::dto::ApiResponse;
use crate::repositories::staff_repository::StaffRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct StaffController {
    staff: StaffRepository,
}

impl StaffController {
    pub fn new(state: &AppState) -> Self {
        Self {
            staff: StaffRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(
        &self,
        request: CreateStaffRequest,
    ) -> Result<ApiResponse<StaffResponse>, AppError> {
        request.validate()?;

        let name = request.name.trim().to_string();
        if self.staff.name_exists(&name).await? {
            return Err(AppError::Conflict(
                "El colaborador ya está registrado".to_string(),
            ));
        }

        let staff = self.staff.create(name).await?;

        Ok(ApiResponse::success_with_message(
            staff.into(),
            "Colaborador creado exitosamente".to_string(),
        ))
    }

    /// Listar colaboradores. Con `active = Some(true)` devuelve solo los
    /// asignables a lavados nuevos; los inactivos siguen visibles en los
    /// lavados históricos que los referencian.
    pub async fn list(&self, active: Option<bool>) -> Result<Vec<StaffResponse>, AppError> {
        let staff = self.staff.list(active).await?;
        Ok(staff.into_iter().map(StaffResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateStaffRequest,
    ) -> Result<ApiResponse<StaffResponse>, AppError> {
        request.validate()?;

        let name = match request.name.as_deref() {
            Some(value) => {
                let trimmed = value.trim().to_string();
                let current = self
                    .staff
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Colaborador no encontrado".to_string()))?;
                if trimmed != current.name && self.staff.name_exists(&trimmed).await? {
                    return Err(AppError::Conflict(
                        "El colaborador ya está registrado".to_string(),
                    ));
                }
                Some(trimmed)
            }
            None => None,
        };

        let staff = self.staff.update(id, name, request.active).await?;

        Ok(ApiResponse::success_with_message(
            staff.into(),
            "Colaborador actualizado exitosamente".to_string(),
        ))
    }
}
