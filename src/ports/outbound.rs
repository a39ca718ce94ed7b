//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Issue, WorklogEntry};
use chrono::NaiveDate;

/// Issue tracker gateway. One method per remote capability, each a single
/// request: no retries, no session object.
///
/// Errors carry the transport failure as-is (`DomainError::Transport` with
/// status and raw body); tracker-specific error codes are not interpreted here.
#[async_trait::async_trait]
pub trait TrackerPort: Send + Sync {
    /// Check the credentials against the tracker. Every later call
    /// authenticates on its own.
    async fn login(&self) -> Result<(), DomainError>;

    /// Run the configured search query. Returns key + summary per match;
    /// `total_duration` is left unset.
    ///
    /// Only the tracker's first result page is read.
    async fn list_assigned_issues(&self) -> Result<Vec<Issue>, DomainError>;

    /// All worklog entries currently recorded against `issue_key`.
    async fn get_issue_worklog(&self, issue_key: &str) -> Result<Vec<WorklogEntry>, DomainError>;

    /// Create a worklog dated `date`. `raw_duration_input` is parsed by the
    /// tracker, not here. Success only means the write was accepted; re-fetch
    /// to observe what was stored.
    async fn update_worklog(
        &self,
        issue_key: &str,
        raw_duration_input: &str,
        date: NaiveDate,
    ) -> Result<(), DomainError>;
}
