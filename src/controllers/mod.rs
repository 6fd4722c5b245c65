pub mod dashboard_controller;
pub mod staff_controller;
pub mod vehicle_controller;
pub mod wash_job_controller;
