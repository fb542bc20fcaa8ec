//! # relay-api
//!
//! Webhook HTTP server built with Axum: receives signed chat platform
//! events and hands them to the event pipeline.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
