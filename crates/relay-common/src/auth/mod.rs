//! Inbound request authentication

mod signature;

pub use signature::{
    RequestVerifier, SlackSignatureVerifier, SIGNATURE_HEADER, SIGNATURE_VERSION,
    TIMESTAMP_HEADER,
};
