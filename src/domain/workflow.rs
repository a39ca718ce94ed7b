//! Orchestrator state machine states and failure reasons.

use crate::domain::DomainError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Unauthenticated,
    Authenticating,
    ListingIssues,
    AggregatingWorklogs,
    Ready,
    Submitting { issue_key: String },
    Refreshing { issue_key: String },
    /// Terminal for the current run. A new run may be started from here.
    Failed(FailureReason),
}

impl WorkflowState {
    pub fn is_ready(&self) -> bool {
        matches!(self, WorkflowState::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, WorkflowState::Failed(_))
    }

    /// Whether `start` may begin a new run from here.
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            WorkflowState::Unauthenticated | WorkflowState::Ready | WorkflowState::Failed(_)
        )
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Unauthenticated => f.write_str("unauthenticated"),
            WorkflowState::Authenticating => f.write_str("authenticating"),
            WorkflowState::ListingIssues => f.write_str("listing issues"),
            WorkflowState::AggregatingWorklogs => f.write_str("aggregating worklogs"),
            WorkflowState::Ready => f.write_str("ready"),
            WorkflowState::Submitting { issue_key } => write!(f, "submitting {}", issue_key),
            WorkflowState::Refreshing { issue_key } => write!(f, "refreshing {}", issue_key),
            WorkflowState::Failed(_) => f.write_str("failed"),
        }
    }
}

/// Why a run entered `Failed`. The wrapped error is the transport error verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("{0}")]
    Login(DomainError),

    #[error("{0}")]
    ListIssues(DomainError),

    #[error("{source} (worklog of {issue_key})")]
    WorklogFetch {
        issue_key: String,
        source: DomainError,
    },

    #[error("{source} (logging time on {issue_key})")]
    Submission {
        issue_key: String,
        source: DomainError,
    },

    #[error("{source} (refreshing {issue_key})")]
    Refresh {
        issue_key: String,
        source: DomainError,
    },
}

impl FailureReason {
    pub fn error(&self) -> &DomainError {
        match self {
            FailureReason::Login(e) | FailureReason::ListIssues(e) => e,
            FailureReason::WorklogFetch { source, .. }
            | FailureReason::Submission { source, .. }
            | FailureReason::Refresh { source, .. } => source,
        }
    }

    pub fn issue_key(&self) -> Option<&str> {
        match self {
            FailureReason::Login(_) | FailureReason::ListIssues(_) => None,
            FailureReason::WorklogFetch { issue_key, .. }
            | FailureReason::Submission { issue_key, .. }
            | FailureReason::Refresh { issue_key, .. } => Some(issue_key),
        }
    }
}

/// Errors returned by a worklog submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// A network step failed; the run is now `Failed`.
    #[error(transparent)]
    Failed(#[from] FailureReason),

    /// Submissions are only accepted in `Ready`. State unchanged.
    #[error("cannot log time while {state}")]
    NotReady { state: String },

    /// Key is not in the current issue table. State unchanged.
    #[error("unknown issue {0}")]
    UnknownIssue(String),
}
