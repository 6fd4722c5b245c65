pub mod plan_repository;
pub mod staff_repository;
pub mod vehicle_repository;
pub mod wash_job_repository;
