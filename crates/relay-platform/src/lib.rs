//! # relay-platform
//!
//! HTTP implementations of the `ChatPlatform` and `TicketingPlatform` traits.
//!
//! Every request carries a bounded timeout and is attempted once; failed
//! webhook processing is retried by the chat platform's own redelivery.

mod http;
pub mod jira;
pub mod slack;

pub use jira::JiraClient;
pub use slack::SlackClient;
