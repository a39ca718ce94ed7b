//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/wire types here; adapters map into these.

use chrono::NaiveDate;
use std::fmt;

/// Session credentials and query. Immutable once validated.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
    pub base_url: String,
    /// Path between the host and the REST resources, e.g. `/rest/api/2`.
    pub api_path_prefix: String,
    /// Search expression (JQL) selecting the issues to show.
    pub query: String,
}

impl Credentials {
    /// `{base_url}{api_path_prefix}` without a trailing slash.
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_path_prefix.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_path_prefix", &self.api_path_prefix)
            .field("query", &self.query)
            .finish()
    }
}

/// An assigned issue. `total_duration` stays `None` until its worklogs are folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub total_duration: Option<String>,
}

impl Issue {
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            summary: summary.into(),
            total_duration: None,
        }
    }
}

/// One logged span of time against an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorklogEntry {
    pub duration_seconds: u64,
}

/// A worklog the user asked to create. Discarded once the write settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWorklogSubmission {
    pub issue_key: String,
    /// Tracker shorthand such as `1h 30m`; passed through unvalidated.
    pub raw_duration_input: String,
    pub date: NaiveDate,
}
