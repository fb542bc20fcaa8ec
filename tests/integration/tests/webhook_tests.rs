//! Webhook Integration Tests
//!
//! The server runs in-process with the in-memory dedup store; the chat
//! platform and the ticketing system are `httpmock` servers.
//!
//! Run with: cargo test -p integration-tests --test webhook_tests

use std::io::Write;

use httpmock::prelude::*;
use integration_tests::{
    assert_json, assert_status, reaction_event, url_verification, PlatformMocks, TestServer,
    CHANNEL, SIGNING_SECRET, TRIGGER, TS,
};
use relay_common::SlackSignatureVerifier;
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_health_check() {
    let mocks = PlatformMocks::start().await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_ready() {
    let mocks = PlatformMocks::start().await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["dedup_store"], "healthy");
}

// ============================================================================
// Request Verification Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_url_verification() {
    let mocks = PlatformMocks::start().await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server
        .post_event(&url_verification("3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        body,
        json!({"challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsigned_delivery_is_rejected() {
    let mocks = PlatformMocks::start().await;
    let reactions = mocks.mock_reactions(1).await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let body = reaction_event("reaction_added", TRIGGER).to_string();
    let response = server.post_raw_event(body, None, None).await.unwrap();
    let error: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(error["error"]["code"], "INVALID_SIGNATURE");
    assert_eq!(reactions.hits_async().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stale_signature_is_rejected() {
    let mocks = PlatformMocks::start().await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let body = reaction_event("reaction_added", TRIGGER).to_string();
    let stale = (chrono::Utc::now().timestamp() - 3600).to_string();
    let signature = SlackSignatureVerifier::new(SIGNING_SECRET, 300)
        .sign(&stale, body.as_bytes())
        .unwrap();

    let response = server
        .post_raw_event(body, Some(&stale), Some(&signature))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_first_reaction_creates_ticket_once() {
    let mocks = PlatformMocks::start().await;
    mocks.mock_reactions(1).await;
    mocks.mock_thread_root().await;
    mocks.mock_users().await;
    mocks.mock_jira_lookups().await;
    let reply = mocks.mock_post_message().await;
    let create = mocks
        .jira
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/api/3/issue")
                .json_body_includes(
                    json!({"fields": {
                        "project": {"key": "TPM"},
                        "summary": "Slack Request from Grace Hopper",
                        "issuetype": {"name": "Task"},
                        "parent": {"key": "TPM-36"},
                        "assignee": {"accountId": "acc-ada"},
                        "reporter": {"accountId": "acc-grace"},
                        "customfield_10020": 77
                    }})
                    .to_string(),
                );
            then.status(201).json_body(json!({"id": "10001", "key": "TPM-101"}));
        })
        .await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server
        .post_event(&reaction_event("reaction_added", TRIGGER))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ack["status"], "ok");
    assert_eq!(ack["outcome"], "ticket_created");
    assert_eq!(ack["ticket_key"], "TPM-101");
    assert_eq!(
        ack["ticket_url"],
        format!("{}/browse/TPM-101", mocks.jira.base_url())
    );
    create.assert_async().await;
    reply.assert_async().await;

    // Redelivery of the same event is recognised and creates nothing.
    let response = server
        .post_event(&reaction_event("reaction_added", TRIGGER))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ack["outcome"], "ignored");
    assert_eq!(ack["reason"], "already_handled");
    assert_eq!(create.hits_async().await, 1);
    assert_eq!(reply.hits_async().await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reply_links_ticket_in_thread() {
    let mocks = PlatformMocks::start().await;
    mocks.mock_reactions(1).await;
    mocks.mock_thread_root().await;
    mocks.mock_users().await;
    mocks.mock_jira_lookups().await;
    mocks.mock_create_issue("TPM-7").await;
    let browse = format!("{}/browse/TPM-7", mocks.jira.base_url());
    let reply = mocks
        .slack
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat.postMessage")
                .json_body_includes(
                    json!({
                        "channel": CHANNEL,
                        "thread_ts": TS,
                        "text": format!("<@U1> picked this up: <{browse}|TPM-7>")
                    })
                    .to_string(),
                );
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server
        .post_event(&reaction_event("reaction_added", TRIGGER))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    reply.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repeat_reaction_is_not_first_occurrence() {
    let mocks = PlatformMocks::start().await;
    mocks.mock_reactions(2).await;
    let root = mocks.mock_thread_root().await;
    let create = mocks.mock_create_issue("TPM-1").await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server
        .post_event(&reaction_event("reaction_added", TRIGGER))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ack["outcome"], "ignored");
    assert_eq!(ack["reason"], "not_first_occurrence");
    assert_eq!(root.hits_async().await, 0);
    assert_eq!(create.hits_async().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_deleted_message_is_dropped_as_not_found() {
    let mocks = PlatformMocks::start().await;
    mocks.mock_reactions(1).await;
    mocks
        .slack
        .mock_async(|when, then| {
            when.method(GET).path("/conversations.replies");
            then.status(200)
                .json_body(json!({"ok": false, "error": "thread_not_found"}));
        })
        .await;
    let create = mocks.mock_create_issue("TPM-1").await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server
        .post_event(&reaction_event("reaction_added", TRIGGER))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ack["outcome"], "dropped");
    assert_eq!(ack["reason"], "message_not_found");
    assert_eq!(create.hits_async().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_removed_and_other_reactions_are_ignored() {
    let mocks = PlatformMocks::start().await;
    let reactions = mocks.mock_reactions(1).await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server
        .post_event(&reaction_event("reaction_removed", TRIGGER))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ack["reason"], "reaction_removed");

    let response = server
        .post_event(&reaction_event("reaction_added", "thumbsup"))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ack["reason"], "not_trigger");

    assert_eq!(reactions.hits_async().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_ticket_creation_allows_retry() {
    let mocks = PlatformMocks::start().await;
    mocks.mock_happy_path().await;
    let failing = mocks.mock_create_issue_failure().await;
    let server = TestServer::start(&mocks).await.expect("Failed to start server");

    let response = server
        .post_event(&reaction_event("reaction_added", TRIGGER))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ack["status"], "error");
    assert_eq!(ack["code"], "TICKET_CREATION_FAILED");
    assert_eq!(failing.hits_async().await, 1);

    // The ticketing system recovers; the platform redelivers.
    failing.delete_async().await;
    let create = mocks.mock_create_issue("TPM-102").await;

    let response = server
        .post_event(&reaction_event("reaction_added", TRIGGER))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ack["outcome"], "ticket_created");
    assert_eq!(ack["ticket_key"], "TPM-102");
    create.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_routing_file_overrides_project() {
    let mocks = PlatformMocks::start().await;
    mocks.mock_happy_path().await;
    mocks
        .jira
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/agile/1.0/board/12/sprint");
            then.status(200).json_body(json!({"values": []}));
        })
        .await;
    let create = mocks
        .jira
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/api/3/issue")
                .json_body_includes(
                    json!({"fields": {"project": {"key": "OPS"}, "parent": {"key": "OPS-7"}}})
                        .to_string(),
                );
            then.status(201).json_body(json!({"key": "OPS-1"}));
        })
        .await;

    let mut routes = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        routes,
        "[channels.{CHANNEL}]\nproject_key = \"OPS\"\nepic_key = \"OPS-7\"\nboard_id = \"12\""
    )
    .unwrap();

    let config = mocks
        .config_with(&[("ROUTES_FILE", routes.path().to_str().unwrap())])
        .unwrap();
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let response = server
        .post_event(&reaction_event("reaction_added", TRIGGER))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ack["ticket_key"], "OPS-1");
    create.assert_async().await;
}
