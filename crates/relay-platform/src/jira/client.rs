//! `TicketingPlatform` over the Jira Cloud REST and Agile APIs

use std::time::Duration;

use async_trait::async_trait;
use relay_core::{IssueRequest, PlatformError, PlatformResult, TicketingPlatform};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::document::issue_fields;
use crate::http::{build_client, decode_json, ensure_success, transport_error};

/// Field id that carries the sprint on Jira Cloud
pub const DEFAULT_SPRINT_FIELD: &str = "customfield_10020";

#[derive(Debug, Deserialize)]
struct SprintPage {
    #[serde(default)]
    values: Vec<Sprint>,
}

#[derive(Debug, Deserialize)]
struct Sprint {
    id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    account_id: String,
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    key: String,
}

/// Jira client authenticated with an API token (basic auth)
#[derive(Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    api_token: String,
    sprint_field: String,
}

impl JiraClient {
    /// Create a client; `timeout` bounds every request
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
        timeout: Duration,
    ) -> PlatformResult<Self> {
        Ok(Self {
            http: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            api_token: api_token.into(),
            sprint_field: DEFAULT_SPRINT_FIELD.to_string(),
        })
    }

    /// Override the custom field used for the active sprint
    pub fn with_sprint_field(mut self, field: impl Into<String>) -> Self {
        self.sprint_field = field.into();
        self
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> PlatformResult<reqwest::Response> {
        let response = request
            .basic_auth(&self.username, Some(&self.api_token))
            .send()
            .await
            .map_err(|e| transport_error(operation, &e))?;
        ensure_success(response).await
    }
}

#[async_trait]
impl TicketingPlatform for JiraClient {
    #[instrument(skip(self))]
    async fn active_iteration(&self, board_id: &str) -> PlatformResult<Option<i64>> {
        let operation = "active sprint lookup";
        let request = self
            .http
            .get(format!(
                "{}/rest/agile/1.0/board/{board_id}/sprint",
                self.base_url
            ))
            .query(&[("state", "active")]);

        let page: SprintPage = decode_json(operation, self.send(operation, request).await?).await?;
        Ok(page.values.first().map(|s| s.id))
    }

    #[instrument(skip(self))]
    async fn find_account_by_email(&self, email: &str) -> PlatformResult<Option<String>> {
        let operation = "user search";
        let request = self
            .http
            .get(format!("{}/rest/api/3/user/search", self.base_url))
            .query(&[("query", email)]);

        let accounts: Vec<Account> =
            decode_json(operation, self.send(operation, request).await?).await?;
        Ok(accounts.into_iter().next().map(|a| a.account_id))
    }

    #[instrument(skip(self, request), fields(project = %request.project_key, parent = %request.parent_key))]
    async fn create_issue(&self, request: &IssueRequest) -> PlatformResult<String> {
        let operation = "issue creation";
        let payload = json!({ "fields": issue_fields(request, &self.sprint_field) });
        let http_request = self
            .http
            .post(format!("{}/rest/api/3/issue", self.base_url))
            .json(&payload);

        let created: CreatedIssue =
            decode_json(operation, self.send(operation, http_request).await?).await?;
        if created.key.trim().is_empty() {
            return Err(PlatformError::Decode(
                "issue creation response has an empty key".to_string(),
            ));
        }

        info!(issue_key = %created.key, "Issue created");
        Ok(created.key)
    }

    fn browse_url(&self, issue_key: &str) -> String {
        format!("{}/browse/{issue_key}", self.base_url)
    }
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .field("sprint_field", &self.sprint_field)
            .finish()
    }
}
