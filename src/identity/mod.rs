//! Identity directory abstraction.
//!
//! [`IdentityClient`] is the seam the remediation engine calls through;
//! [`GraphIdentityClient`] speaks the Microsoft Graph user API.

pub mod client;
pub mod error;
pub mod graph;

pub use client::IdentityClient;
pub use error::{IdentityError, Result};
pub use graph::{DirectoryConfig, GraphIdentityClient, DEFAULT_DIRECTORY_URL};
