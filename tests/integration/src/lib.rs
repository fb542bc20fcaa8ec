//! Integration test utilities for the reaction relay
//!
//! Spawns the real server against mocked chat and ticketing platforms and
//! sends it signed webhook deliveries.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
