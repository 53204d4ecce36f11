//! Common utilities shared across services.
//!
//! This crate provides:
//! - Boundary error handling (domain error -> gRPC status)
//! - Deployment environment and tracing setup

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{Environment, ParseEnvironmentError};
pub use error::AppError;
