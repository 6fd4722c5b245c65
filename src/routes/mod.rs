pub mod dashboard_routes;
pub mod staff_routes;
pub mod vehicle_routes;
pub mod wash_job_routes;
