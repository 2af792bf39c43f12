//! Batch validation for payment-status updates.
//!
//! The repository owns the transaction; this service owns the pure checks:
//! batch shape, target status, and the missing-id diff for the existence
//! pre-check. Every transition between the three states is permitted, so
//! there is no per-row transition rule to enforce.

use std::collections::HashSet;

use crate::RecordId;
use crate::error::RequestError;
use crate::request::types::{PaymentStatus, RequestFamily};

/// Maximum number of ids a single batch may reference.
pub const MAX_BATCH_SIZE: usize = 100;

/// Stateless validation for bulk payment-status updates.
pub struct StatusTransition;

impl StatusTransition {
    /// Validates the batch shape and parses the target status.
    ///
    /// # Errors
    ///
    /// - [`RequestError::MissingField`] for an empty batch
    /// - [`RequestError::TooManyIds`] beyond [`MAX_BATCH_SIZE`]
    /// - [`RequestError::InvalidStatus`] for an unknown status
    pub fn validate(ids: &[RecordId], status: &str) -> Result<PaymentStatus, RequestError> {
        if ids.is_empty() {
            return Err(RequestError::MissingField("request_ids".to_string()));
        }
        if ids.len() > MAX_BATCH_SIZE {
            return Err(RequestError::TooManyIds {
                count: ids.len(),
                max: MAX_BATCH_SIZE,
            });
        }
        PaymentStatus::parse(status)
    }

    /// Returns the requested ids that do not exist, in request order.
    ///
    /// An empty result means the whole batch may proceed; a non-empty result
    /// must abort the batch without touching any row.
    #[must_use]
    pub fn missing_ids(requested: &[RecordId], existing: &[RecordId]) -> Vec<RecordId> {
        let existing: HashSet<RecordId> = existing.iter().copied().collect();
        let mut seen = HashSet::new();
        requested
            .iter()
            .copied()
            .filter(|id| !existing.contains(id) && seen.insert(*id))
            .collect()
    }

    /// Audit text for an applied batch.
    #[must_use]
    pub fn audit_batch(
        family: RequestFamily,
        actor_email: &str,
        status: PaymentStatus,
        ids: &[RecordId],
    ) -> String {
        let id_list = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{actor_email} updated payment_status to '{status}' for request(s) with ID(s): \
             {id_list} in {}.",
            family.ledger_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_is_rejected() {
        let err = StatusTransition::validate(&[], "Paid").unwrap_err();
        assert!(matches!(err, RequestError::MissingField(f) if f == "request_ids"));
    }

    #[test]
    fn test_batch_cap() {
        let ids: Vec<RecordId> = (1..=101).collect();
        let err = StatusTransition::validate(&ids, "Paid").unwrap_err();
        assert!(matches!(
            err,
            RequestError::TooManyIds {
                count: 101,
                max: 100
            }
        ));

        let ids: Vec<RecordId> = (1..=100).collect();
        assert!(StatusTransition::validate(&ids, "Paid").is_ok());
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let err = StatusTransition::validate(&[1], "Settled").unwrap_err();
        assert!(matches!(err, RequestError::InvalidStatus(s) if s == "Settled"));
    }

    #[test]
    fn test_every_status_is_a_valid_target() {
        for status in ["Pending", "Paid", "Unconfirmed"] {
            assert!(StatusTransition::validate(&[1], status).is_ok());
        }
    }

    #[test]
    fn test_missing_ids_lists_only_missing() {
        let missing = StatusTransition::missing_ids(&[1, 2, 3, 4, 5], &[1, 2, 4, 5]);
        assert_eq!(missing, vec![3]);
    }

    #[test]
    fn test_missing_ids_preserves_order_and_dedupes() {
        let missing = StatusTransition::missing_ids(&[9, 3, 9, 7], &[]);
        assert_eq!(missing, vec![9, 3, 7]);
    }

    #[test]
    fn test_missing_ids_empty_when_all_exist() {
        assert!(StatusTransition::missing_ids(&[1, 2], &[2, 1]).is_empty());
    }

    #[test]
    fn test_audit_batch_text() {
        let text = StatusTransition::audit_batch(
            RequestFamily::Advance,
            "ops@example.com",
            PaymentStatus::Paid,
            &[4, 8],
        );
        assert_eq!(
            text,
            "ops@example.com updated payment_status to 'Paid' for request(s) with ID(s): \
             4, 8 in Advance Payment Request."
        );
    }
}
