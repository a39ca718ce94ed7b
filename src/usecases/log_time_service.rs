//! Log-time workflow: login -> list issues -> fan out worklog fetches -> join -> render,
//! then submit -> single-issue refresh -> partial re-render.
//!
//! - The fan-out waits for every per-issue fetch to settle; one failure fails the whole run
//!   and nothing is rendered
//! - A submission re-fetches only the submitted issue's worklog
//! - Every network failure moves the run to `Failed` and is shown verbatim; nothing is retried

use crate::domain::{
    FailureReason, Issue, PendingWorklogSubmission, WorkflowError, WorkflowState, WorkingCalendar,
    WorklogEntry,
};
use crate::ports::{PresenterPort, TrackerPort};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Log-time orchestrator. Owns the workflow state and the issue table it rendered.
///
/// All operations take `&mut self`, so one instance never has two runs in flight.
/// Separate instances sharing a presenter are not coordinated: a late response from
/// an older instance can still overwrite a newer one's cells.
pub struct LogTimeService {
    tracker: Arc<dyn TrackerPort>,
    presenter: Arc<dyn PresenterPort>,
    calendar: WorkingCalendar,
    project_title: Option<String>,
    state: WorkflowState,
    issues: Vec<Issue>,
    /// Incremented on every `start`; tags log lines per run.
    generation: u64,
}

impl LogTimeService {
    pub fn new(
        tracker: Arc<dyn TrackerPort>,
        presenter: Arc<dyn PresenterPort>,
        calendar: WorkingCalendar,
        project_title: Option<String>,
    ) -> Self {
        Self {
            tracker,
            presenter,
            calendar,
            project_title,
            state: WorkflowState::Unauthenticated,
            issues: Vec::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Issues from the last successful run, with folded durations.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn issue(&self, issue_key: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.key == issue_key)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn calendar(&self) -> WorkingCalendar {
        self.calendar
    }

    /// Run login, issue listing and worklog aggregation, then render the table.
    ///
    /// Allowed from `Unauthenticated`, `Ready` and `Failed` (a reload). On failure the
    /// previously rendered table is left as is.
    pub async fn start(&mut self) -> Result<(), FailureReason> {
        debug_assert!(self.state.can_start(), "start while {}", self.state);
        self.generation += 1;
        info!(generation = self.generation, "starting log-time run");

        self.presenter.set_loading_indicator(true);
        let outcome = self.load_issues().await;
        self.presenter.set_loading_indicator(false);

        match outcome {
            Ok(issues) => {
                info!(
                    generation = self.generation,
                    issues = issues.len(),
                    "worklogs aggregated"
                );
                self.issues = issues;
                self.state = WorkflowState::Ready;
                if let Some(title) = &self.project_title {
                    self.presenter.set_project_title(title);
                }
                self.presenter.render_issue_table(&self.issues);
                Ok(())
            }
            Err(reason) => Err(self.fail(reason)),
        }
    }

    async fn load_issues(&mut self) -> Result<Vec<Issue>, FailureReason> {
        self.state = WorkflowState::Authenticating;
        self.tracker.login().await.map_err(FailureReason::Login)?;

        self.state = WorkflowState::ListingIssues;
        let mut issues = self
            .tracker
            .list_assigned_issues()
            .await
            .map_err(FailureReason::ListIssues)?;
        info!(count = issues.len(), "listed assigned issues");

        self.state = WorkflowState::AggregatingWorklogs;
        let tracker = &self.tracker;
        let settled = join_all(
            issues
                .iter()
                .map(|issue| tracker.get_issue_worklog(&issue.key)),
        )
        .await;

        // Every fetch has settled. Fold only if all of them succeeded.
        let mut totals = Vec::with_capacity(issues.len());
        let mut first_failure = None;
        for (issue, outcome) in issues.iter().zip(settled) {
            match outcome {
                Ok(entries) => totals.push(self.format_total(&entries)),
                Err(source) => {
                    warn!(issue_key = %issue.key, error = %source, "worklog fetch failed");
                    if first_failure.is_none() {
                        first_failure = Some(FailureReason::WorklogFetch {
                            issue_key: issue.key.clone(),
                            source,
                        });
                    }
                }
            }
        }
        if let Some(reason) = first_failure {
            return Err(reason);
        }

        for (issue, total) in issues.iter_mut().zip(totals) {
            issue.total_duration = Some(total);
        }
        Ok(issues)
    }

    /// Submit a worklog, then refresh only that issue's duration.
    ///
    /// Only accepted in `Ready` and for an issue in the current table; otherwise
    /// nothing is sent and the state is unchanged. The displayed duration only
    /// changes after the tracker confirms the write and the re-fetch succeeds.
    pub async fn submit_worklog(
        &mut self,
        submission: PendingWorklogSubmission,
    ) -> Result<(), WorkflowError> {
        if !self.state.is_ready() {
            return Err(WorkflowError::NotReady {
                state: self.state.to_string(),
            });
        }
        if self.issue(&submission.issue_key).is_none() {
            return Err(WorkflowError::UnknownIssue(submission.issue_key));
        }

        self.presenter.clear_error();
        self.presenter.set_loading_indicator(true);
        let outcome = self.submit_and_refresh(&submission).await;
        self.presenter.set_loading_indicator(false);

        match outcome {
            Ok(formatted) => {
                if let Some(issue) = self.issues.iter_mut().find(|i| i.key == submission.issue_key)
                {
                    issue.total_duration = Some(formatted.clone());
                }
                self.presenter
                    .update_issue_duration(&submission.issue_key, &formatted);
                self.state = WorkflowState::Ready;
                info!(issue_key = %submission.issue_key, total = %formatted, "issue refreshed");
                Ok(())
            }
            Err(reason) => Err(self.fail(reason).into()),
        }
    }

    async fn submit_and_refresh(
        &mut self,
        submission: &PendingWorklogSubmission,
    ) -> Result<String, FailureReason> {
        let issue_key = submission.issue_key.as_str();

        self.state = WorkflowState::Submitting {
            issue_key: issue_key.to_string(),
        };
        debug!(
            issue_key,
            input = %submission.raw_duration_input,
            preview_seconds = ?self.calendar.parse_shorthand(&submission.raw_duration_input),
            date = %submission.date,
            "submitting worklog"
        );
        self.tracker
            .update_worklog(issue_key, &submission.raw_duration_input, submission.date)
            .await
            .map_err(|source| FailureReason::Submission {
                issue_key: issue_key.to_string(),
                source,
            })?;

        self.state = WorkflowState::Refreshing {
            issue_key: issue_key.to_string(),
        };
        let entries = self
            .tracker
            .get_issue_worklog(issue_key)
            .await
            .map_err(|source| FailureReason::Refresh {
                issue_key: issue_key.to_string(),
                source,
            })?;

        Ok(self.format_total(&entries))
    }

    fn format_total(&self, entries: &[WorklogEntry]) -> String {
        self.calendar
            .aggregate(entries.iter().map(|e| e.duration_seconds))
            .to_string()
    }

    fn fail(&mut self, reason: FailureReason) -> FailureReason {
        error!(
            generation = self.generation,
            state = %self.state,
            reason = %reason,
            "log-time run failed"
        );
        self.presenter.show_error(&reason.to_string());
        self.state = WorkflowState::Failed(reason.clone());
        reason
    }
}
