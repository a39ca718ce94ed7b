//! Infrastructure adapters. Implement outbound ports.
//!
//! Jira REST client and terminal UI. Map errors to DomainError.

pub mod jira;
pub mod ui;
