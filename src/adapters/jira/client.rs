//! Implements TrackerPort against the Jira REST API (v2 resource layout).
//!
//! Every request carries basic auth; there is no session to keep. Non-2xx
//! responses become `DomainError::Transport` with the raw body, uninterpreted.

use crate::adapters::jira::mapper::{
    self, SearchResponse, WorklogCreateRequest, WorklogResponse,
};
use crate::domain::{Credentials, DomainError, Issue, WorklogEntry};
use crate::ports::TrackerPort;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const DEFAULT_USER_AGENT: &str = concat!("jira-logtime/", env!("CARGO_PKG_VERSION"));

/// Jira gateway adapter. One `reqwest::Client`, credentials attached per request.
pub struct JiraClient {
    http: Client,
    credentials: Credentials,
    api_root: String,
}

impl JiraClient {
    /// Build the HTTP client. No request or connect timeout is set.
    pub fn new(credentials: Credentials) -> Result<Self, DomainError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DomainError::Network(format!("build http client: {}", e)))?;

        let api_root = credentials.api_root();
        Ok(Self {
            http,
            credentials,
            api_root,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.credentials.username, Some(&self.credentials.secret))
    }

    /// Send and require a 2xx status. Failures carry status + raw body.
    async fn send(request: RequestBuilder) -> Result<Response, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<body unreadable: {}>", e));
            Err(DomainError::Transport {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn parse_json<T>(response: Response) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
    {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| DomainError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TrackerPort for JiraClient {
    async fn login(&self) -> Result<(), DomainError> {
        let request = self
            .authed(self.http.get(self.url_for("user")))
            .query(&[("username", self.credentials.username.as_str())]);
        Self::send(request).await?;
        info!(username = %self.credentials.username, "authenticated against tracker");
        Ok(())
    }

    async fn list_assigned_issues(&self) -> Result<Vec<Issue>, DomainError> {
        let request = self
            .authed(self.http.get(self.url_for("search")))
            .query(&[
                ("jql", self.credentials.query.as_str()),
                ("fields", "summary"),
            ]);
        let response = Self::send(request).await?;
        let parsed: SearchResponse = Self::parse_json(response).await?;
        let issues: Vec<Issue> = parsed
            .issues
            .into_iter()
            .map(mapper::issue_to_domain)
            .collect();
        debug!(count = issues.len(), "search returned issues");
        Ok(issues)
    }

    async fn get_issue_worklog(&self, issue_key: &str) -> Result<Vec<WorklogEntry>, DomainError> {
        let path = format!("issue/{}/worklog", issue_key);
        let request = self.authed(self.http.get(self.url_for(&path)));
        let response = Self::send(request).await?;
        let parsed: WorklogResponse = Self::parse_json(response).await?;
        debug!(issue_key, count = parsed.worklogs.len(), "fetched worklog");
        Ok(parsed.worklogs.iter().map(mapper::worklog_to_domain).collect())
    }

    async fn update_worklog(
        &self,
        issue_key: &str,
        raw_duration_input: &str,
        date: NaiveDate,
    ) -> Result<(), DomainError> {
        let path = format!("issue/{}/worklog", issue_key);
        let payload = WorklogCreateRequest::new(raw_duration_input, date);
        let request = self.authed(self.http.post(self.url_for(&path))).json(&payload);
        Self::send(request).await?;
        info!(issue_key, time_spent = raw_duration_input, %date, "worklog accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const BASIC_AUTH: &str = "Basic YWxpY2U6czNjcmV0";

    fn client_for(server: &mockito::ServerGuard) -> JiraClient {
        JiraClient::new(Credentials {
            username: "alice".into(),
            secret: "s3cret".into(),
            base_url: server.url(),
            api_path_prefix: "/rest/api/2".into(),
            query: "assignee = currentUser()".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn login_sends_basic_auth_and_username() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/2/user")
            .match_query(Matcher::UrlEncoded("username".into(), "alice".into()))
            .match_header("authorization", BASIC_AUTH)
            .with_status(200)
            .with_body(r#"{"name":"alice"}"#)
            .create_async()
            .await;

        client_for(&server).login().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_failure_keeps_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/user")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let err = client_for(&server).login().await.unwrap_err();
        assert_eq!(
            err,
            DomainError::Transport {
                status: 401,
                body: "Unauthorized".into()
            }
        );
    }

    #[tokio::test]
    async fn lists_issues_for_configured_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("jql".into(), "assignee = currentUser()".into()),
                Matcher::UrlEncoded("fields".into(), "summary".into()),
            ]))
            .match_header("authorization", BASIC_AUTH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"issues":[
                    {"key":"LT-1","fields":{"summary":"Fix login"}},
                    {"key":"LT-2","fields":{"summary":"Write docs"}}
                ]}"#,
            )
            .create_async()
            .await;

        let issues = client_for(&server).list_assigned_issues().await.unwrap();
        mock.assert_async().await;
        assert_eq!(
            issues,
            vec![Issue::new("LT-1", "Fix login"), Issue::new("LT-2", "Write docs")]
        );
    }

    #[tokio::test]
    async fn fetches_worklog_seconds() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/issue/LT-1/worklog")
            .match_header("authorization", BASIC_AUTH)
            .with_status(200)
            .with_body(r#"{"worklogs":[{"timeSpentSeconds":3600},{"timeSpentSeconds":1800}]}"#)
            .create_async()
            .await;

        let entries = client_for(&server).get_issue_worklog("LT-1").await.unwrap();
        assert_eq!(
            entries,
            vec![
                WorklogEntry {
                    duration_seconds: 3600
                },
                WorklogEntry {
                    duration_seconds: 1800
                }
            ]
        );
    }

    #[tokio::test]
    async fn malformed_worklog_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/issue/LT-1/worklog")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = client_for(&server).get_issue_worklog("LT-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Decode(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn posts_worklog_with_raw_duration_and_date() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/2/issue/LT-1/worklog")
            .match_header("authorization", BASIC_AUTH)
            .match_body(Matcher::Json(serde_json::json!({
                "started": "2024-03-05T00:00:00.000+0000",
                "timeSpent": "1h 30m"
            })))
            .with_status(201)
            .with_body(r#"{"id":"100"}"#)
            .create_async()
            .await;

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        client_for(&server)
            .update_worklog("LT-1", "1h 30m", date)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_worklog_surfaces_tracker_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest/api/2/issue/LT-1/worklog")
            .with_status(400)
            .with_body(r#"{"errors":{"timeLogged":"Invalid time duration entered."}}"#)
            .create_async()
            .await;

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let err = client_for(&server)
            .update_worklog("LT-1", "soon", date)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("Invalid time duration entered."));
    }

    #[tokio::test]
    async fn truncated_error_body_is_reported_not_dropped() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\npartial")
                .await;
        });

        let client = JiraClient::new(Credentials {
            username: "alice".into(),
            secret: "s3cret".into(),
            base_url: format!("http://{}", addr),
            api_path_prefix: "/rest/api/2".into(),
            query: "assignee = currentUser()".into(),
        })
        .unwrap();

        let err = client.login().await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("body unreadable"), "{}", err);
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let client = JiraClient::new(Credentials {
            username: "alice".into(),
            secret: "s3cret".into(),
            base_url: "http://127.0.0.1:1".into(),
            api_path_prefix: "/rest/api/2".into(),
            query: "assignee = currentUser()".into(),
        })
        .unwrap();

        let err = client.login().await.unwrap_err();
        assert!(matches!(err, DomainError::Network(_)), "{:?}", err);
    }
}
