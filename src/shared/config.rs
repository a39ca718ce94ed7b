//! Application configuration. Tracker credentials, search query, working calendar.

use crate::domain::duration::{DEFAULT_DAYS_PER_WEEK, DEFAULT_HOURS_PER_DAY};
use crate::domain::{Credentials, DomainError, WorkingCalendar};
use serde::Deserialize;

/// Environment prefix: `JIRA_LOGTIME_USERNAME`, `JIRA_LOGTIME_BASE_URL`, ...
pub const ENV_PREFIX: &str = "JIRA_LOGTIME";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Tracker login. Read from JIRA_LOGTIME_USERNAME.
    #[serde(default)]
    pub username: Option<String>,

    /// Password or API token, sent as basic auth. Read from JIRA_LOGTIME_PASSWORD.
    #[serde(default)]
    pub password: Option<String>,

    /// e.g. `https://jira.example.com`. Read from JIRA_LOGTIME_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// REST path prefix, e.g. `/rest/api/2`. Read from JIRA_LOGTIME_API_EXTENSION.
    #[serde(default)]
    pub api_extension: Option<String>,

    /// JQL selecting the issues to list. Read from JIRA_LOGTIME_JQL.
    #[serde(default)]
    pub jql: Option<String>,

    /// Optional heading above the table. Read from JIRA_LOGTIME_DESCRIPTION.
    #[serde(default)]
    pub description: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Working calendar
    // ─────────────────────────────────────────────────────────────────────────
    /// Working hours per day (default 8). Read from JIRA_LOGTIME_HOURS_PER_DAY.
    #[serde(default)]
    pub hours_per_day: Option<u64>,

    /// Working days per week (default 5). Read from JIRA_LOGTIME_DAYS_PER_WEEK.
    #[serde(default)]
    pub days_per_week: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let file = std::env::var(format!("{}_CONFIG", ENV_PREFIX)).ok();
        Self::from_sources(file.as_deref(), config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(
        file: Option<&str>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        if let Some(path) = file {
            c = c.add_source(config::File::with_name(path));
        }
        // Environment wins over the file.
        c = c.add_source(env);
        c.build()?.try_deserialize()
    }

    /// Validate and assemble the session credentials.
    ///
    /// Checked in order username, password, base URL, API extension, query;
    /// the first absent (or blank) one is reported.
    pub fn credentials(&self) -> Result<Credentials, DomainError> {
        Ok(Credentials {
            username: required(&self.username, "username")?,
            secret: required(&self.password, "password")?,
            base_url: required(&self.base_url, "base URL")?,
            api_path_prefix: required(&self.api_extension, "API extension")?,
            query: required(&self.jql, "JQL query")?,
        })
    }

    /// Working calendar; zero hours or days is a configuration error.
    pub fn calendar(&self) -> Result<WorkingCalendar, DomainError> {
        let hours = self.hours_per_day.unwrap_or(DEFAULT_HOURS_PER_DAY);
        let days = self.days_per_week.unwrap_or(DEFAULT_DAYS_PER_WEEK);
        WorkingCalendar::new(hours, days).ok_or_else(|| {
            DomainError::Config(format!(
                "working calendar (hours per day = {}, days per week = {})",
                hours, days
            ))
        })
    }

    /// Returns the description if configured and non-blank.
    pub fn project_title(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }
}

/// Blank values count as absent; anything else is passed through untouched.
fn required(value: &Option<String>, name: &str) -> Result<String, DomainError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(String::from)
        .ok_or_else(|| DomainError::Config(name.to_string()))
}
