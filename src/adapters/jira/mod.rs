//! Jira adapter. Implements TrackerPort over Jira's REST API.

pub mod client;
pub mod mapper;

pub use client::JiraClient;
