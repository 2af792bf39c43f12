//! The closed error taxonomy for fund request operations.
//!
//! Every validation and invariant failure is detected inside the core and
//! surfaced as one of these variants - persistence exceptions never escape
//! raw. The presentation layer maps kinds to transport codes via
//! [`RequestError::http_status_code`]; only [`RequestError::Repository`] is
//! retryable.

use rust_decimal::Decimal;
use thiserror::Error;

use fundflow_shared::ApiEnvelope;

use crate::RecordId;

fn fmt_ids(ids: &[RecordId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during fund request operations.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A required field is absent or blank.
    #[error("Field '{0}' is required.")]
    MissingField(String),

    /// A monetary field is not a usable amount.
    #[error("Field '{field}' is not a valid amount: {reason}")]
    InvalidAmount {
        /// The offending field name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A date field could not be parsed.
    #[error("Field '{field}' is not a valid date: '{value}'")]
    InvalidDate {
        /// The offending field name.
        field: String,
        /// The raw value received.
        value: String,
    },

    /// The VAT policy code is not one of the recognized tiers.
    #[error("Invalid VAT policy code: '{0}'")]
    InvalidPolicyCode(String),

    /// The request collides with an existing record.
    #[error("Duplicate request: {0} already exists.")]
    DuplicateRequest(String),

    /// The cumulative advance percentage for a purchase order would pass 100.
    #[error(
        "Total advance percentage for PO '{po_number}' would reach {total}%, exceeding 100%. \
         Please verify existing advances."
    )]
    AllocationExceeded {
        /// The purchase order whose allocation would overflow.
        po_number: String,
        /// The total that the rejected request would have produced.
        total: Decimal,
    },

    /// One or more referenced request ids do not exist.
    #[error("The following request ids do not exist: {}", fmt_ids(.0))]
    NotFound(Vec<RecordId>),

    /// The payment status is not one of the valid states.
    #[error("Invalid payment status: '{0}'")]
    InvalidStatus(String),

    /// A bulk operation referenced more ids than allowed.
    #[error("Too many request ids provided: {count}. Maximum allowed is {max}.")]
    TooManyIds {
        /// Number of ids in the batch.
        count: usize,
        /// The batch cap.
        max: usize,
    },

    /// The underlying store failed; the enclosing transaction was rolled back.
    #[error("Repository unavailable: {0}")]
    Repository(String),
}

impl RequestError {
    /// Returns the stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::InvalidPolicyCode(_) => "INVALID_POLICY_CODE",
            Self::DuplicateRequest(_) => "DUPLICATE_REQUEST",
            Self::AllocationExceeded { .. } => "ALLOCATION_EXCEEDED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::TooManyIds { .. } => "TOO_MANY_IDS",
            Self::Repository(_) => "REPOSITORY_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code class for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - fix your input
            Self::MissingField(_)
            | Self::InvalidAmount { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidPolicyCode(_)
            | Self::DuplicateRequest(_)
            | Self::AllocationExceeded { .. }
            | Self::InvalidStatus(_)
            | Self::TooManyIds { .. } => 400,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 500 Internal Server Error - retry later
            Self::Repository(_) => 500,
        }
    }

    /// Returns true if a caller may retry the operation unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(_))
    }

    /// Wraps this error in the `{status, message}` response envelope.
    #[must_use]
    pub fn to_envelope(&self) -> ApiEnvelope<()> {
        ApiEnvelope::failure(self.to_string())
    }
}
