//! Jira REST wire types and their mapping to domain entities.
//!
//! Only the fields the worklog table needs are decoded; everything else in the
//! payloads is ignored.

use crate::domain::{Issue, WorklogEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `GET /search` response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<IssueDto>,
}

#[derive(Debug, Deserialize)]
pub struct IssueDto {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFieldsDto,
}

#[derive(Debug, Default, Deserialize)]
pub struct IssueFieldsDto {
    #[serde(default)]
    pub summary: Option<String>,
}

/// `GET /issue/{key}/worklog` response.
#[derive(Debug, Deserialize)]
pub struct WorklogResponse {
    #[serde(default)]
    pub worklogs: Vec<WorklogDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogDto {
    #[serde(default)]
    pub time_spent_seconds: u64,
}

/// `POST /issue/{key}/worklog` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogCreateRequest<'a> {
    pub started: String,
    pub time_spent: &'a str,
}

impl<'a> WorklogCreateRequest<'a> {
    pub fn new(time_spent: &'a str, date: NaiveDate) -> Self {
        Self {
            started: started_timestamp(date),
            time_spent,
        }
    }
}

/// Jira's `started` format (`yyyy-MM-dd'T'HH:mm:ss.SSSZ`) at UTC midnight of `date`.
pub fn started_timestamp(date: NaiveDate) -> String {
    format!("{}T00:00:00.000+0000", date.format("%Y-%m-%d"))
}

pub fn issue_to_domain(dto: IssueDto) -> Issue {
    Issue::new(dto.key, dto.fields.summary.unwrap_or_default())
}

pub fn worklog_to_domain(dto: &WorklogDto) -> WorklogEntry {
    WorklogEntry {
        duration_seconds: dto.time_spent_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_response_keys_and_summaries() {
        let body = r#"{
            "startAt": 0, "maxResults": 50, "total": 2,
            "issues": [
                {"id": "10001", "key": "LT-1", "fields": {"summary": "Fix login"}},
                {"id": "10002", "key": "LT-2", "fields": {}}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let issues: Vec<Issue> = parsed.issues.into_iter().map(issue_to_domain).collect();
        assert_eq!(issues, vec![Issue::new("LT-1", "Fix login"), Issue::new("LT-2", "")]);
    }

    #[test]
    fn decodes_worklog_seconds() {
        let body = r#"{
            "startAt": 0, "maxResults": 2, "total": 2,
            "worklogs": [
                {"id": "1", "timeSpent": "1h", "timeSpentSeconds": 3600},
                {"id": "2", "timeSpent": "30m", "timeSpentSeconds": 1800}
            ]
        }"#;
        let parsed: WorklogResponse = serde_json::from_str(body).unwrap();
        let seconds: Vec<u64> = parsed
            .worklogs
            .iter()
            .map(|w| worklog_to_domain(w).duration_seconds)
            .collect();
        assert_eq!(seconds, vec![3600, 1800]);
    }

    #[test]
    fn missing_worklogs_field_is_empty() {
        let parsed: WorklogResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.worklogs.is_empty());
    }

    #[test]
    fn create_request_uses_jira_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let json = serde_json::to_value(WorklogCreateRequest::new("1h 30m", date)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "started": "2024-03-05T00:00:00.000+0000",
                "timeSpent": "1h 30m"
            })
        );
    }
}
