pub mod adoption;
pub mod api;
pub mod config;
pub mod dates;
pub mod db;
pub mod entities;
pub mod lookup;
pub mod metrics;
pub mod migrator;
pub mod routes;
pub mod telemetry;

pub use sea_orm;
