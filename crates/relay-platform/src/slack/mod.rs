//! Chat platform (Slack Web API) client

mod client;
mod types;

pub use client::{SlackClient, DEFAULT_API_BASE};
