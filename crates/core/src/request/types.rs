//! Fund request domain types.
//!
//! One logical entity - a fund request - in three family variants. Each
//! family has its own reference numbers and dates; the money block
//! (net/vat/wht/payable/gross) is shared and always derived server-side.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::RecordId;
use crate::error::RequestError;
use crate::policy::{PolicyAmounts, VatPolicy, Withholding};

/// The three fund request families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestFamily {
    /// Advance payment against a purchase order, tracked by percentage.
    Advance,
    /// Supplier invoice settlement.
    Supplier,
    /// Expense claim (the "compass" ledger).
    Expense,
}

impl RequestFamily {
    /// Whether WHT is deducted for this family.
    #[must_use]
    pub const fn withholding(self) -> Withholding {
        match self {
            Self::Expense => Withholding::Deducted,
            Self::Advance | Self::Supplier => Withholding::Waived,
        }
    }

    /// Lower-case description used in audit texts.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Advance => "advance payment request",
            Self::Supplier => "supplier payment request",
            Self::Expense => "expense payment request",
        }
    }

    /// Ledger label used in batch audit texts.
    #[must_use]
    pub const fn ledger_label(self) -> &'static str {
        match self {
            Self::Advance => "Advance Payment Request",
            Self::Supplier => "Supplier Fund Request",
            Self::Expense => "Expense Fund Request",
        }
    }

    /// Audit text for a creation by `actor_email`.
    #[must_use]
    pub fn audit_created(self, actor_email: &str, id: RecordId) -> String {
        format!(
            "{actor_email} created a new {} with ID {id}",
            self.description()
        )
    }

    /// Audit text for an edit by `actor_email`.
    #[must_use]
    pub fn audit_updated(self, actor_email: &str, id: RecordId) -> String {
        format!("{actor_email} updated {} with ID {id}", self.description())
    }
}

/// Payment lifecycle states.
///
/// Any state may transition to any other; there is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Awaiting payment (the default on creation).
    #[default]
    Pending,
    /// Payment has been made.
    Paid,
    /// Payment reported but not yet confirmed.
    Unconfirmed,
}

impl PaymentStatus {
    /// Parses a status string.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidStatus`] for anything outside the
    /// three valid states.
    pub fn parse(value: &str) -> Result<Self, RequestError> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            "Unconfirmed" => Ok(Self::Unconfirmed),
            other => Err(RequestError::InvalidStatus(other.to_string())),
        }
    }

    /// Returns the storage form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Unconfirmed => "Unconfirmed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the `MMM-YYYY` reporting label for a date (e.g. `Jan-2026`).
///
/// `%b` is locale-independent in chrono, so the label is stable regardless
/// of the host environment.
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b-%Y").to_string()
}

/// Normalized input for an Advance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceInput {
    /// Supplier display name.
    pub supplier_name: String,
    /// Supplier identifier in the supplier directory.
    pub supplier_id: String,
    /// Site / project code the advance is for.
    pub site: String,
    /// Purchase order the advance draws against.
    pub po_number: String,
    /// Date the request was received.
    pub date_received: NaiveDate,
    /// Share of the PO's gross value advanced now (0-100).
    pub percentage: Decimal,
    /// Raw invoice amount.
    pub amount: Decimal,
    /// Discount subtracted before tax.
    pub discount: Decimal,
    /// Charges added after tax.
    pub other_charges: Decimal,
    /// Tax policy code.
    pub vat_policy: VatPolicy,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
    /// Free-form note.
    pub note: String,
}

/// Normalized input for a Supplier request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierInput {
    /// Supplier display name.
    pub supplier_name: String,
    /// Supplier identifier in the supplier directory.
    pub supplier_id: String,
    /// Supplier invoice number.
    pub invoice_number: String,
    /// Internal purchase number (unique per request).
    pub purchase_number: String,
    /// Purchase order reference.
    pub po_number: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Purchase date.
    pub purchase_date: NaiveDate,
    /// Date the request was received.
    pub date_received: NaiveDate,
    /// Project code.
    pub project_code: String,
    /// What the invoice covers.
    pub description: String,
    /// Raw invoice amount.
    pub amount: Decimal,
    /// Discount subtracted before tax.
    pub discount: Decimal,
    /// Charges added after tax.
    pub other_charges: Decimal,
    /// Tax policy code.
    pub vat_policy: VatPolicy,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
    /// Free-form note.
    pub note: String,
}

/// Normalized input for an Expense request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// Supplier display name.
    pub supplier_name: String,
    /// Supplier identifier in the supplier directory.
    pub supplier_id: String,
    /// Supplier invoice number.
    pub invoice_number: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Date the request was received.
    pub date_received: NaiveDate,
    /// Project code.
    pub project_code: String,
    /// What the expense covers.
    pub description: String,
    /// Expense classification.
    pub classification: String,
    /// Share of the gross value claimed now (0-100).
    pub percentage: Decimal,
    /// Raw net value of the expense.
    pub amount: Decimal,
    /// Discount subtracted before tax.
    pub discount: Decimal,
    /// Charges added after tax.
    pub other_charges: Decimal,
    /// Tax policy code.
    pub vat_policy: VatPolicy,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
    /// Free-form note.
    pub note: String,
}

/// A validated Advance request ready for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct AdvanceDraft {
    /// Normalized caller input.
    pub input: AdvanceInput,
    /// Derived money amounts.
    pub amounts: PolicyAmounts,
    /// Gross amount × percentage / 100.
    pub advance_payment: Decimal,
}

impl AdvanceDraft {
    /// The family's uniqueness key for this draft.
    #[must_use]
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey::Advance {
            supplier_name: self.input.supplier_name.clone(),
            percentage: self.input.percentage,
            po_number: self.input.po_number.clone(),
            date_received: self.input.date_received,
        }
    }
}

/// A validated Supplier request ready for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierDraft {
    /// Normalized caller input.
    pub input: SupplierInput,
    /// Derived money amounts.
    pub amounts: PolicyAmounts,
    /// `MMM-YYYY` label of the invoice date.
    pub invoice_month: String,
    /// `MMM-YYYY` label of the purchase date.
    pub purchase_month: String,
}

impl SupplierDraft {
    /// The family's uniqueness key for this draft.
    #[must_use]
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey::Supplier {
            purchase_number: self.input.purchase_number.clone(),
        }
    }
}

/// A validated Expense request ready for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseDraft {
    /// Normalized caller input.
    pub input: ExpenseInput,
    /// Derived money amounts.
    pub amounts: PolicyAmounts,
    /// `MMM-YYYY` label of the invoice date.
    pub invoice_month: String,
    /// Gross amount × percentage / 100.
    pub claim_amount: Decimal,
}

impl ExpenseDraft {
    /// The family's uniqueness key for this draft.
    #[must_use]
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey::Expense {
            invoice_number: self.input.invoice_number.clone(),
            supplier_name: self.input.supplier_name.clone(),
        }
    }
}

/// Family-specific uniqueness key, compared trimmed and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateKey {
    /// No two active advances may share all four of these.
    Advance {
        /// Supplier display name.
        supplier_name: String,
        /// Advance percentage.
        percentage: Decimal,
        /// Purchase order reference.
        po_number: String,
        /// Date the request was received.
        date_received: NaiveDate,
    },
    /// Purchase numbers are globally unique for supplier requests.
    Supplier {
        /// Internal purchase number.
        purchase_number: String,
    },
    /// An invoice number may appear once per supplier.
    Expense {
        /// Supplier invoice number.
        invoice_number: String,
        /// Supplier display name.
        supplier_name: String,
    },
}

impl std::fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Advance {
                supplier_name,
                percentage,
                po_number,
                date_received,
            } => write!(
                f,
                "an advance for supplier '{supplier_name}' at {percentage}% of PO \
                 '{po_number}' received on {date_received}"
            ),
            Self::Supplier { purchase_number } => {
                write!(f, "purchase number '{purchase_number}'")
            }
            Self::Expense {
                invoice_number,
                supplier_name,
            } => write!(
                f,
                "invoice '{invoice_number}' for supplier '{supplier_name}'"
            ),
        }
    }
}
