//! Custom extractors for Axum handlers

mod signed;

pub use signed::SignedJson;
