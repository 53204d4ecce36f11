//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated definitions for the SSO `Auth` service:
//! register, login and admin checks.

/// SSO auth service definitions.
pub mod sso {
    tonic::include_proto!("sso");
}

// Re-export commonly used items
pub use sso::auth_client::AuthClient;
pub use sso::auth_server::{Auth, AuthServer};
