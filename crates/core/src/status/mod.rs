//! Bulk payment-status transition validation.

pub mod service;

pub use service::{MAX_BATCH_SIZE, StatusTransition};
