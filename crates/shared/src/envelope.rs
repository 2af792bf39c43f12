//! Response envelope shared with the presentation layer.
//!
//! Every endpoint of the existing system replies with the same
//! `{status, message, data}` shape; the envelope lives here so the core can
//! describe outcomes without depending on any web framework.

use serde::Serialize;

/// The `{status, message, data}` response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    /// `"Success"` or `"Failed"`.
    pub status: String,
    /// Human-readable outcome description.
    pub message: String,
    /// Payload, omitted on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiEnvelope<T> {
    /// Builds a success envelope with a payload.
    #[must_use]
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "Success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Builds a failure envelope.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "Failed".to_string(),
            message: message.into(),
            data: None,
        }
    }
}
