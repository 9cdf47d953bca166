//! # REST API Components
//!
//! HTTP surface of the credential rotator: the remediation trigger, a liveness
//! probe, error rendering and the server loop.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_api_server;
