//! Shared types and configuration for Fundflow.
//!
//! This crate provides common types used across all other crates:
//! - Resolved authentication context passed into the core
//! - The `{status, message, data}` response envelope
//! - Configuration management

pub mod auth;
pub mod config;
pub mod envelope;

pub use auth::{AuthContext, Role};
pub use config::AppConfig;
pub use envelope::ApiEnvelope;
