//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the duration codec and workflow states live here. Dependencies flow inward.

pub mod duration;
pub mod entities;
pub mod errors;
pub mod workflow;

pub use duration::{AggregatedDuration, WorkingCalendar};
pub use entities::{Credentials, Issue, PendingWorklogSubmission, WorklogEntry};
pub use errors::DomainError;
pub use workflow::{FailureReason, WorkflowError, WorkflowState};
