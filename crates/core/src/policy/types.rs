//! Tax policy domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Discrete VAT policy codes recognized by the ledger.
///
/// The codes are labels, not literal rates: for continuity with the stored
/// ledgers, `2.00%` and `5.00%` compute VAT at 7.5% and differ only in the
/// withholding deduction and the payable multiplier. See [`super::MoneyPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatPolicy {
    /// `0.00%` - no VAT, no WHT.
    #[serde(rename = "0.00%")]
    Exempt,
    /// `7.50%` - standard VAT added on top of the net amount.
    #[serde(rename = "7.50%")]
    Standard,
    /// `2.00%` - VAT at 7.5% with a 2% withholding tier.
    #[serde(rename = "2.00%")]
    WhtTwo,
    /// `5.00%` - VAT at 7.5% with a 5% withholding tier.
    #[serde(rename = "5.00%")]
    WhtFive,
}

impl VatPolicy {
    /// Parses a policy code string.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidPolicyCode`] for unrecognized codes.
    pub fn parse(code: &str) -> Result<Self, RequestError> {
        match code {
            "0.00%" => Ok(Self::Exempt),
            "7.50%" => Ok(Self::Standard),
            "2.00%" => Ok(Self::WhtTwo),
            "5.00%" => Ok(Self::WhtFive),
            other => Err(RequestError::InvalidPolicyCode(other.to_string())),
        }
    }

    /// Returns the wire/storage form of the code.
    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Exempt => "0.00%",
            Self::Standard => "7.50%",
            Self::WhtTwo => "2.00%",
            Self::WhtFive => "5.00%",
        }
    }
}

impl std::fmt::Display for VatPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Whether withholding tax applies to the computing family.
///
/// WHT is deducted for the Expense family only; Advance and Supplier
/// requests always carry `wht = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Withholding {
    /// WHT is computed for the `2.00%`/`5.00%` tiers.
    Deducted,
    /// WHT is always zero regardless of the policy tier.
    Waived,
}

/// Amounts derived from a net amount under a VAT policy.
///
/// These are always recomputed server-side; callers never supply them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAmounts {
    /// Net amount the derivation started from (amount minus discount).
    pub net_amount: Decimal,
    /// Value-added tax.
    pub vat: Decimal,
    /// Withholding tax.
    pub wht: Decimal,
    /// Amount payable before other charges.
    pub amount_payable: Decimal,
    /// Amount payable plus other charges.
    pub gross_amount: Decimal,
}
