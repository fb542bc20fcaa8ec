//! Ticketing platform (Jira Cloud REST) client

mod client;
mod document;

pub use client::{JiraClient, DEFAULT_SPRINT_FIELD};
pub use document::{description_document, issue_fields};
