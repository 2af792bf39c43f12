//! Money derivation from a tax-policy code.
//!
//! This is the one place VAT, WHT, payable and gross amounts are computed.
//! Every intermediate value is rounded to 2 decimal places immediately, not
//! only at the end, so results stay identical to the amounts already stored
//! in the ledgers.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::types::{PolicyAmounts, VatPolicy, Withholding};
use crate::error::RequestError;

/// Pure money-math library for fund requests.
///
/// All methods are deterministic and side-effect free. Monetary values use
/// `Decimal` end to end; rounding is half-away-from-zero at 2 decimal
/// places, matching the historical ledgers.
pub struct MoneyPolicy;

impl MoneyPolicy {
    /// Rounds a monetary value to 2 decimal places, half away from zero.
    #[must_use]
    pub fn round(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Computes the net amount (`amount - discount`), rounded to 2 places.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidAmount`] if the discount exceeds the
    /// amount; a net amount is never negative.
    pub fn net_amount(amount: Decimal, discount: Decimal) -> Result<Decimal, RequestError> {
        let net = Self::round(amount - discount);
        if net < Decimal::ZERO {
            return Err(RequestError::InvalidAmount {
                field: "discount".to_string(),
                reason: format!("discount {discount} exceeds amount {amount}"),
            });
        }
        Ok(net)
    }

    /// Derives VAT, WHT, payable and gross amounts for a net amount.
    ///
    /// Tiers (the `2.00%`/`5.00%` labels intentionally compute VAT at 7.5%;
    /// this is existing ledger semantics that must be preserved bit-for-bit):
    ///
    /// | code    | vat          | wht (if deducted) | payable        |
    /// |---------|--------------|-------------------|----------------|
    /// | `0.00%` | 0            | 0                 | net            |
    /// | `7.50%` | net × 0.075  | 0                 | net + vat      |
    /// | `2.00%` | net × 0.075  | net × 0.020       | net × 1.055    |
    /// | `5.00%` | net × 0.075  | net × 0.050       | net × 1.025    |
    ///
    /// `gross_amount = amount_payable + other_charges`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use fundflow_core::policy::{MoneyPolicy, VatPolicy, Withholding};
    ///
    /// let amounts =
    ///     MoneyPolicy::compute(dec!(1000.00), VatPolicy::Standard, dec!(0), Withholding::Waived);
    /// assert_eq!(amounts.vat, dec!(75.00));
    /// assert_eq!(amounts.amount_payable, dec!(1075.00));
    /// ```
    #[must_use]
    pub fn compute(
        net_amount: Decimal,
        policy: VatPolicy,
        other_charges: Decimal,
        withholding: Withholding,
    ) -> PolicyAmounts {
        let vat_rate = Decimal::new(75, 3); // 0.075 for every non-exempt tier

        let (vat, wht, amount_payable) = match policy {
            VatPolicy::Exempt => (Decimal::ZERO, Decimal::ZERO, net_amount),
            VatPolicy::Standard => {
                let vat = Self::round(net_amount * vat_rate);
                (vat, Decimal::ZERO, Self::round(net_amount + vat))
            }
            VatPolicy::WhtTwo => (
                Self::round(net_amount * vat_rate),
                Self::withhold(net_amount, Decimal::new(20, 3), withholding),
                Self::round(net_amount * Decimal::new(1055, 3)),
            ),
            VatPolicy::WhtFive => (
                Self::round(net_amount * vat_rate),
                Self::withhold(net_amount, Decimal::new(50, 3), withholding),
                Self::round(net_amount * Decimal::new(1025, 3)),
            ),
        };

        PolicyAmounts {
            net_amount,
            vat,
            wht,
            amount_payable,
            gross_amount: Self::round(amount_payable + other_charges),
        }
    }

    /// Computes the portion of a gross amount covered by a percentage.
    ///
    /// Used for the Advance family's `advance_payment` and the Expense
    /// family's `claim_amount`.
    #[must_use]
    pub fn advance_share(gross_amount: Decimal, percentage: Decimal) -> Decimal {
        Self::round(gross_amount * percentage / Decimal::ONE_HUNDRED)
    }

    fn withhold(net_amount: Decimal, rate: Decimal, withholding: Withholding) -> Decimal {
        match withholding {
            Withholding::Deducted => Self::round(net_amount * rate),
            Withholding::Waived => Decimal::ZERO,
        }
    }
}
