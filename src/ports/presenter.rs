//! Presentation port. The orchestrator renders through this; adapters hold no business logic.

use crate::domain::Issue;

/// Render side of the UI boundary.
pub trait PresenterPort: Send + Sync {
    /// Heading shown above the table (the configured project description).
    fn set_project_title(&self, title: &str);

    /// Draw the full table. Called once per successful run, after every
    /// issue's duration has been folded.
    fn render_issue_table(&self, issues: &[Issue]);

    /// Replace one issue's displayed duration, leaving every other row as is.
    fn update_issue_duration(&self, issue_key: &str, formatted_duration: &str);

    /// Show a user-visible error message.
    fn show_error(&self, message: &str);

    fn clear_error(&self);

    fn set_loading_indicator(&self, loading: bool);
}
