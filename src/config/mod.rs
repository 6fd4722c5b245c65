pub mod database;
pub mod environment;
