//! Services module
//!
//! Este módulo contiene la lógica de negocio pura de la aplicación:
//! reloj inyectable, política de cuota, worklist diario y reporting.

pub mod clock;
pub mod dashboard_service;
pub mod quota_service;
pub mod report_service;
pub mod worklist_service;
