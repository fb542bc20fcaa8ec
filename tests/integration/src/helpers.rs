//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers wired to mock platforms and
//! for sending signed webhook deliveries.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use httpmock::MockServer;
use relay_api::{create_app, create_app_state};
use relay_common::auth::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use relay_common::{AppConfig, SlackSignatureVerifier};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Signing secret shared by the test server and the test client
pub const SIGNING_SECRET: &str = "integration-signing-secret";

/// Webhook endpoint path
pub const EVENTS_PATH: &str = "/slack/events";

/// Mock chat platform and ticketing system
pub struct PlatformMocks {
    pub slack: MockServer,
    pub jira: MockServer,
}

impl PlatformMocks {
    pub async fn start() -> Self {
        Self {
            slack: MockServer::start_async().await,
            jira: MockServer::start_async().await,
        }
    }

    /// Configuration pointing every outbound call at the mocks
    pub fn config(&self) -> Result<AppConfig> {
        self.config_with(&[])
    }

    /// Configuration with extra variables layered on top
    pub fn config_with(&self, extra: &[(&str, &str)]) -> Result<AppConfig> {
        let mut vars: HashMap<String, String> = [
            ("DEDUP_STORE", "memory".to_string()),
            ("SLACK_SIGNING_SECRET", SIGNING_SECRET.to_string()),
            ("SLACK_BOT_TOKEN", "xoxb-test".to_string()),
            ("SLACK_API_BASE", self.slack.base_url()),
            ("SLACK_WORKSPACE_URL", "https://acme.slack.com".to_string()),
            ("JIRA_URL", self.jira.base_url()),
            ("JIRA_USERNAME", "bot@acme.com".to_string()),
            ("JIRA_API_TOKEN", "jira-token".to_string()),
            ("OUTBOUND_TIMEOUT_MS", "2000".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        vars.extend(extra.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));

        AppConfig::from_lookup(|name| vars.get(name).cloned())
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    signer: SlackSignatureVerifier,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server against the given mocks
    pub async fn start(mocks: &PlatformMocks) -> Result<Self> {
        Self::start_with_config(mocks.config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let signer = SlackSignatureVerifier::new(
            &config.slack.signing_secret,
            config.slack.signature_max_age_secs,
        );

        let state = create_app_state(&config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            signer,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Deliver a webhook payload signed with the shared secret
    pub async fn post_event(&self, payload: &Value) -> Result<Response> {
        let body = payload.to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self
            .signer
            .sign(&timestamp, body.as_bytes())
            .ok_or_else(|| anyhow::anyhow!("signing failed"))?;
        self.post_raw_event(body, Some(&timestamp), Some(&signature))
            .await
    }

    /// Deliver a raw body with explicit signature headers
    pub async fn post_raw_event(
        &self,
        body: String,
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), EVENTS_PATH);
        let mut request = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .body(body);
        if let Some(timestamp) = timestamp {
            request = request.header(TIMESTAMP_HEADER, timestamp);
        }
        if let Some(signature) = signature {
            request = request.header(SIGNATURE_HEADER, signature);
        }
        Ok(request.send().await?)
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
