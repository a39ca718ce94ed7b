//! Application use cases. Orchestrate domain logic via ports.

pub mod log_time_service;

pub use log_time_service::LogTimeService;
