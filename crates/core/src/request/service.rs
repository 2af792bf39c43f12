//! Fund request preparation pipeline.
//!
//! [`FundRequestLedger`] runs the pure half of create/edit for each family:
//! field validation, normalization, and money derivation. The resulting
//! draft carries everything the repository needs to finish the operation
//! (duplicate lookup, allocation check, persistence) inside one transaction.

use super::fields::FieldMap;
use super::types::{
    AdvanceDraft, AdvanceInput, ExpenseDraft, ExpenseInput, RequestFamily, SupplierDraft,
    SupplierInput, month_label,
};
use crate::error::RequestError;
use crate::policy::MoneyPolicy;

/// Validation and computation pipeline for fund requests.
///
/// Pure: no storage access. Duplicate and allocation checks run against
/// aggregates the repository reads inside the persistence transaction.
pub struct FundRequestLedger;

impl FundRequestLedger {
    /// Validates and computes an Advance request.
    ///
    /// # Errors
    ///
    /// Any 400-class validation error from the taxonomy.
    pub fn prepare_advance(fields: &FieldMap) -> Result<AdvanceDraft, RequestError> {
        let input = AdvanceInput {
            supplier_name: fields.required_text("supplier_name")?,
            supplier_id: fields.required_text("supplier_id")?,
            site: fields.required_text("site")?,
            po_number: fields.required_text("po_number")?,
            date_received: fields.required_date("date_received")?,
            percentage: fields.required_percentage("percentage")?,
            amount: fields.required_amount("amount")?,
            discount: fields.required_amount("discount")?,
            other_charges: fields.optional_amount("other_charges")?,
            vat_policy: fields.vat_policy()?,
            payment_status: fields.payment_status()?,
            note: fields.optional_text("note"),
        };

        let net = MoneyPolicy::net_amount(input.amount, input.discount)?;
        let amounts = MoneyPolicy::compute(
            net,
            input.vat_policy,
            input.other_charges,
            RequestFamily::Advance.withholding(),
        );
        let advance_payment = MoneyPolicy::advance_share(amounts.gross_amount, input.percentage);

        Ok(AdvanceDraft {
            input,
            amounts,
            advance_payment,
        })
    }

    /// Validates and computes a Supplier request.
    ///
    /// # Errors
    ///
    /// Any 400-class validation error from the taxonomy.
    pub fn prepare_supplier(fields: &FieldMap) -> Result<SupplierDraft, RequestError> {
        let input = SupplierInput {
            supplier_name: fields.required_text("supplier_name")?,
            supplier_id: fields.required_text("supplier_id")?,
            invoice_number: fields.required_text("invoice_number")?,
            purchase_number: fields.required_text("purchase_number")?,
            po_number: fields.required_text("po_number")?,
            invoice_date: fields.required_date("invoice_date")?,
            purchase_date: fields.required_date("purchase_date")?,
            date_received: fields.required_date("date_received")?,
            project_code: fields.required_text("project_code")?,
            description: fields.required_text("description")?,
            amount: fields.required_amount("amount")?,
            discount: fields.required_amount("discount")?,
            other_charges: fields.required_amount("other_charges")?,
            vat_policy: fields.vat_policy()?,
            payment_status: fields.payment_status()?,
            note: fields.optional_text("note"),
        };

        let net = MoneyPolicy::net_amount(input.amount, input.discount)?;
        let amounts = MoneyPolicy::compute(
            net,
            input.vat_policy,
            input.other_charges,
            RequestFamily::Supplier.withholding(),
        );
        let invoice_month = month_label(input.invoice_date);
        let purchase_month = month_label(input.purchase_date);

        Ok(SupplierDraft {
            input,
            amounts,
            invoice_month,
            purchase_month,
        })
    }

    /// Validates and computes an Expense request.
    ///
    /// # Errors
    ///
    /// Any 400-class validation error from the taxonomy.
    pub fn prepare_expense(fields: &FieldMap) -> Result<ExpenseDraft, RequestError> {
        let input = ExpenseInput {
            supplier_name: fields.required_text("supplier_name")?,
            supplier_id: fields.required_text("supplier_id")?,
            invoice_number: fields.required_text("invoice_number")?,
            invoice_date: fields.required_date("invoice_date")?,
            date_received: fields.required_date("date_received")?,
            project_code: fields.required_text("project_code")?,
            description: fields.required_text("description")?,
            classification: fields.required_text("classification")?,
            percentage: fields.required_percentage("percentage")?,
            amount: fields.required_amount("net_value")?,
            discount: fields.required_amount("discount")?,
            other_charges: fields.required_amount("other_charges")?,
            vat_policy: fields.vat_policy()?,
            payment_status: fields.payment_status()?,
            note: fields.optional_text("note"),
        };

        let net = MoneyPolicy::net_amount(input.amount, input.discount)?;
        let amounts = MoneyPolicy::compute(
            net,
            input.vat_policy,
            input.other_charges,
            RequestFamily::Expense.withholding(),
        );
        let invoice_month = month_label(input.invoice_date);
        let claim_amount = MoneyPolicy::advance_share(amounts.gross_amount, input.percentage);

        Ok(ExpenseDraft {
            input,
            amounts,
            invoice_month,
            claim_amount,
        })
    }
}
