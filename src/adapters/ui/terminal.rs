//! Implements PresenterPort on the terminal: prettytable issue table, spinner, coloured errors.
//!
//! A terminal cannot patch a single cell in place, so a duration update reprints the
//! table from the kept rows with only that row changed.

use crate::adapters::ui::progress::LoadingSpinner;
use crate::domain::Issue;
use crate::ports::PresenterPort;
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{Cell, Row, Table};
use std::io::{Write, stderr, stdout};
use std::sync::{Mutex, PoisonError};

/// Summaries longer than this are cut with an ellipsis.
const SUMMARY_WIDTH: usize = 60;

/// Terminal presenter. Keeps the rendered rows so single-issue updates can redraw.
pub struct TerminalPresenter {
    rows: Mutex<Vec<Issue>>,
    last_error: Mutex<Option<String>>,
    spinner: LoadingSpinner,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            last_error: Mutex::new(None),
            spinner: LoadingSpinner::new("Talking to Jira..."),
        }
    }

    /// Error currently on display, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Displayed duration for `issue_key` (empty string for nothing logged).
    pub fn displayed_duration(&self, issue_key: &str) -> Option<String> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|i| i.key == issue_key)
            .map(|i| i.total_duration.clone().unwrap_or_default())
    }

    fn print_table(rows: &[Issue]) {
        let mut out = stdout();
        let _ = out.execute(Print(render_table(rows)));
        let _ = out.flush();
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenterPort for TerminalPresenter {
    fn set_project_title(&self, title: &str) {
        let mut out = stdout();
        let _ = out.execute(SetAttribute(Attribute::Bold));
        let _ = out.execute(SetForegroundColor(Color::Cyan));
        let _ = out.execute(Print(format!("\r\n{}\r\n", title)));
        let _ = out.execute(ResetColor);
        let _ = out.execute(SetAttribute(Attribute::Reset));
        let _ = out.flush();
    }

    fn render_issue_table(&self, issues: &[Issue]) {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        *rows = issues.to_vec();
        Self::print_table(&rows);
    }

    fn update_issue_duration(&self, issue_key: &str, formatted_duration: &str) {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(issue) = rows.iter_mut().find(|i| i.key == issue_key) {
            issue.total_duration = Some(formatted_duration.to_string());
        }
        Self::print_table(&rows);
    }

    fn show_error(&self, message: &str) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
        let mut err = stderr();
        let _ = err.execute(SetForegroundColor(Color::Red));
        let _ = err.execute(Print(format!("✖ {}\r\n", message)));
        let _ = err.execute(ResetColor);
        let _ = err.flush();
    }

    fn clear_error(&self) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn set_loading_indicator(&self, loading: bool) {
        self.spinner.set(loading);
    }
}

/// Box-drawn table: Issue | Summary | Logged.
pub fn render_table(issues: &[Issue]) -> String {
    let mut table = Table::new();
    table.set_format(*FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("Issue").style_spec("b"),
        Cell::new("Summary").style_spec("b"),
        Cell::new("Logged").style_spec("b"),
    ]));
    for issue in issues {
        table.add_row(Row::new(vec![
            Cell::new(&issue.key),
            Cell::new(&truncate(&issue.summary, SUMMARY_WIDTH)),
            Cell::new(issue.total_duration.as_deref().unwrap_or_default()),
        ]));
    }
    table.to_string()
}

fn truncate(value: &str, limit: usize) -> String {
    let trimmed = value.trim();
    if trimmed.chars().count() <= limit {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
