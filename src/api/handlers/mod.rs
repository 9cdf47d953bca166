//! HTTP request handlers

pub mod health;
pub mod remediation;

pub use health::health_handler;
pub use remediation::credential_rotation_handler;
