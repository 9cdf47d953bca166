//! Data Transfer Objects for the HTTP contract.
//!
//! Inbound bodies use camelCase keys; response bodies are snake_case.

pub mod remediation;

pub use remediation::{
    DryRunResponse, RemediationRequestDto, RemediationResponse, SkippedResponse,
    DRY_RUN_MESSAGE,
};
