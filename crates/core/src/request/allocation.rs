//! Cumulative advance allocation invariant.
//!
//! For any purchase order, the percentages of all active Advance requests
//! may sum to at most 100. The repository computes the current sum inside
//! the same transaction that persists the new row (with a per-PO lock, see
//! the db crate), so two concurrent requests cannot both observe headroom
//! that only one of them can use.

use rust_decimal::Decimal;

use crate::error::RequestError;

/// Enforces the 100% cap on advance allocations per purchase order.
pub struct AllocationInvariant;

impl AllocationInvariant {
    /// Rejects an allocation that would push the PO's total over 100%.
    ///
    /// `allocated` is the percentage sum over active Advance records for the
    /// PO, already excluding the edited record on the edit path. A total of
    /// exactly 100 is permitted; the cap is strict.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::AllocationExceeded`] with the PO number and
    /// the offending total.
    pub fn check(
        po_number: &str,
        new_percentage: Decimal,
        allocated: Decimal,
    ) -> Result<(), RequestError> {
        let total = allocated + new_percentage;
        if total > Decimal::ONE_HUNDRED {
            return Err(RequestError::AllocationExceeded {
                po_number: po_number.to_string(),
                total,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exactly_100_is_permitted() {
        assert!(AllocationInvariant::check("PO-1", dec!(40), dec!(60)).is_ok());
    }

    #[test]
    fn test_over_100_is_rejected_with_total() {
        let err = AllocationInvariant::check("PO-1", dec!(41), dec!(60)).unwrap_err();
        match err {
            RequestError::AllocationExceeded { po_number, total } => {
                assert_eq!(po_number, "PO-1");
                assert_eq!(total, dec!(101));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_first_allocation_on_fresh_po() {
        assert!(AllocationInvariant::check("PO-2", dec!(100), dec!(0)).is_ok());
        assert!(AllocationInvariant::check("PO-2", dec!(100.01), dec!(0)).is_err());
    }

    #[test]
    fn test_fractional_percentages() {
        assert!(AllocationInvariant::check("PO-3", dec!(33.34), dec!(66.66)).is_ok());
        assert!(AllocationInvariant::check("PO-3", dec!(33.35), dec!(66.66)).is_err());
    }
}
