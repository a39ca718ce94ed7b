//! jira-logtime: review logged time on assigned Jira issues and log more, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
