//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Loads the table, then loops over a small action menu: log time on an issue,
//! reload everything, or quit. Errors from the workflow are already shown by the
//! presenter; this adapter only decides what to ask next.

use crate::domain::{
    DomainError, Issue, PendingWorklogSubmission, WorkflowError, WorkflowState, WorkingCalendar,
};
use crate::ports::InputPort;
use crate::usecases::LogTimeService;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use inquire::error::InquireError;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, DateSelect, Select, Text};
use std::fmt;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Applies the neon prompt theme globally.
pub fn apply_theme() {
    let mut config = RenderConfig::default();
    config.prompt_prefix = Styled::new("?").with_fg(Color::LightMagenta);
    config.highlighted_option_prefix = Styled::new("›").with_fg(Color::LightCyan);
    config.answer = StyleSheet::new()
        .with_fg(Color::LightCyan)
        .with_attr(Attributes::BOLD);
    config.help_message = StyleSheet::new().with_fg(Color::DarkGrey);
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    LogTime,
    Reload,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::LogTime => f.write_str("Log time"),
            Action::Reload => f.write_str("Reload issues"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

/// Menu entries available in `state`.
fn actions_for(state: &WorkflowState) -> Vec<Action> {
    if state.is_ready() {
        vec![Action::LogTime, Action::Reload, Action::Quit]
    } else {
        vec![Action::Reload, Action::Quit]
    }
}

/// Issue option in the selector: `KEY  summary  [logged]`.
struct IssueChoice<'a>(&'a Issue);

impl fmt::Display for IssueChoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issue = self.0;
        write!(f, "{}  {}", issue.key, issue.summary)?;
        match issue.total_duration.as_deref() {
            Some(total) if !total.is_empty() => write!(f, "  [{}]", total),
            _ => Ok(()),
        }
    }
}

/// Confirmation text. Shows the parsed breakdown when the input is recognisable shorthand;
/// otherwise repeats the raw input, which is still sent as typed.
fn confirmation_message(
    calendar: &WorkingCalendar,
    issue_key: &str,
    raw_duration_input: &str,
    date: NaiveDate,
) -> String {
    match calendar.parse_shorthand(raw_duration_input) {
        Some(seconds) if seconds > 0 => format!(
            "Log {} on {} for {}?",
            calendar.aggregate([seconds]),
            issue_key,
            date
        ),
        _ => format!(
            "Log \"{}\" on {} for {}? (Jira will interpret it)",
            raw_duration_input.trim(),
            issue_key,
            date
        ),
    }
}

fn prompt_error(e: InquireError) -> DomainError {
    DomainError::Presentation(e.to_string())
}

/// `None` when the user pressed Esc.
fn skippable<T>(result: Result<Option<T>, InquireError>) -> Result<Option<T>, DomainError> {
    result.map_err(prompt_error)
}

/// TUI adapter. Inquire prompts drive the log-time service.
pub struct TuiInputPort {
    service: Mutex<LogTimeService>,
}

impl TuiInputPort {
    pub fn new(service: LogTimeService) -> Self {
        Self {
            service: Mutex::new(service),
        }
    }

    /// Ask which issue, how much and when. `None` if the user backed out.
    fn prompt_submission(
        issues: &[Issue],
        calendar: &WorkingCalendar,
    ) -> Result<Option<PendingWorklogSubmission>, DomainError> {
        if issues.is_empty() {
            warn!("no assigned issues to log time on");
            return Ok(None);
        }

        let choices: Vec<IssueChoice<'_>> = issues.iter().map(IssueChoice).collect();
        let Some(choice) = skippable(Select::new("Issue:", choices).prompt_skippable())? else {
            return Ok(None);
        };
        let issue_key = choice.0.key.clone();

        let Some(raw_duration_input) = skippable(
            Text::new("Time spent:")
                .with_placeholder("1h 30m")
                .with_help_message("Jira shorthand: w, d, h, m")
                .prompt_skippable(),
        )?
        else {
            return Ok(None);
        };

        let Some(date) = skippable(
            DateSelect::new("Date:")
                .with_default(Local::now().date_naive())
                .prompt_skippable(),
        )?
        else {
            return Ok(None);
        };

        let message = confirmation_message(calendar, &issue_key, &raw_duration_input, date);
        let confirmed = skippable(Confirm::new(&message).with_default(true).prompt_skippable())?;
        if confirmed != Some(true) {
            return Ok(None);
        }

        Ok(Some(PendingWorklogSubmission {
            issue_key,
            raw_duration_input,
            date,
        }))
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut service = self.service.lock().await;
        // Failures are already on screen; the menu offers a reload.
        let _ = service.start().await;

        loop {
            let actions = actions_for(service.state());
            let action = match Select::new("What next?", actions).prompt() {
                Ok(action) => action,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    Action::Quit
                }
                Err(e) => return Err(prompt_error(e)),
            };

            match action {
                Action::LogTime => {
                    let calendar = service.calendar();
                    let Some(submission) = Self::prompt_submission(service.issues(), &calendar)?
                    else {
                        continue;
                    };
                    match service.submit_worklog(submission).await {
                        Ok(()) | Err(WorkflowError::Failed(_)) => {}
                        Err(e) => warn!(error = %e, "worklog not submitted"),
                    }
                }
                Action::Reload => {
                    let _ = service.start().await;
                }
                Action::Quit => {
                    info!("bye");
                    return Ok(());
                }
            }
        }
    }
}
