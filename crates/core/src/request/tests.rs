//! Scenario tests across the request pipeline.

use rust_decimal_macros::dec;
use serde_json::{Value, json};

use super::allocation::AllocationInvariant;
use super::dedup::DuplicateGuard;
use super::fields::FieldMap;
use super::service::FundRequestLedger;
use super::types::PaymentStatus;
use crate::error::RequestError;

fn fields(value: Value) -> FieldMap {
    FieldMap::from_value(value).expect("test input must be an object")
}

fn advance_payload() -> Value {
    json!({
        "supplier_name": "Acme Ltd",
        "supplier_id": "118",
        "site": "Lekki Yard",
        "po_number": "PO-2041",
        "date_received": "2026-02-03",
        "percentage": 30,
        "amount": 1000.00,
        "discount": 0,
        "other_charges": 0,
        "vat_policy": "7.50%",
        "payment_status": "Pending",
        "note": "first tranche"
    })
}

fn supplier_payload() -> Value {
    json!({
        "supplier_name": "Acme Ltd",
        "supplier_id": "118",
        "invoice_number": "INV-77",
        "purchase_number": "PN-2041",
        "po_number": "PO-2041",
        "invoice_date": "2026-01-28",
        "purchase_date": "2025-12-15",
        "date_received": "2026-02-03",
        "project_code": "LK-09",
        "description": "Cement supply",
        "amount": 1000.00,
        "discount": 0,
        "other_charges": 24.50,
        "vat_policy": "2.00%"
    })
}

fn expense_payload() -> Value {
    json!({
        "supplier_name": "Acme Ltd",
        "supplier_id": "118",
        "invoice_number": "INV-90",
        "invoice_date": "2026-01-28",
        "date_received": "2026-02-03",
        "project_code": "LK-09",
        "description": "Generator servicing",
        "classification": "Maintenance",
        "percentage": 50,
        "net_value": 1000.00,
        "discount": 0,
        "other_charges": 0,
        "vat_policy": "2.00%"
    })
}

#[test]
fn test_advance_create_pipeline() {
    let draft = FundRequestLedger::prepare_advance(&fields(advance_payload())).unwrap();
    assert_eq!(draft.amounts.net_amount, dec!(1000.00));
    assert_eq!(draft.amounts.vat, dec!(75.00));
    assert_eq!(draft.amounts.wht, dec!(0));
    assert_eq!(draft.amounts.amount_payable, dec!(1075.00));
    assert_eq!(draft.amounts.gross_amount, dec!(1075.00));
    assert_eq!(draft.advance_payment, dec!(322.50));
    assert_eq!(draft.input.payment_status, PaymentStatus::Pending);
}

#[test]
fn test_advance_missing_field_names_it() {
    let mut payload = advance_payload();
    payload.as_object_mut().unwrap().remove("po_number");
    let err = FundRequestLedger::prepare_advance(&fields(payload)).unwrap_err();
    assert!(matches!(err, RequestError::MissingField(f) if f == "po_number"));
}

#[test]
fn test_advance_discount_zero_counts_as_present() {
    // discount: 0 must pass the presence check.
    let draft = FundRequestLedger::prepare_advance(&fields(advance_payload())).unwrap();
    assert_eq!(draft.input.discount, dec!(0));
}

#[test]
fn test_advance_unknown_policy_code() {
    let mut payload = advance_payload();
    payload["vat_policy"] = json!("12.00%");
    let err = FundRequestLedger::prepare_advance(&fields(payload)).unwrap_err();
    assert!(matches!(err, RequestError::InvalidPolicyCode(code) if code == "12.00%"));
}

#[test]
fn test_advance_caller_supplied_paid_is_preserved() {
    let mut payload = advance_payload();
    payload["payment_status"] = json!("Paid");
    let draft = FundRequestLedger::prepare_advance(&fields(payload)).unwrap();
    assert_eq!(draft.input.payment_status, PaymentStatus::Paid);
}

#[test]
fn test_advance_allocation_boundary_via_draft() {
    // Existing advances for the PO sum to 60%: 41 is rejected, 40 accepted.
    let mut payload = advance_payload();
    payload["percentage"] = json!(41);
    let draft = FundRequestLedger::prepare_advance(&fields(payload)).unwrap();
    assert!(
        AllocationInvariant::check(&draft.input.po_number, draft.input.percentage, dec!(60))
            .is_err()
    );

    let mut payload = advance_payload();
    payload["percentage"] = json!(40);
    let draft = FundRequestLedger::prepare_advance(&fields(payload)).unwrap();
    assert!(
        AllocationInvariant::check(&draft.input.po_number, draft.input.percentage, dec!(60))
            .is_ok()
    );
}

#[test]
fn test_edit_excludes_own_percentage_from_aggregate() {
    // A record at 30% (PO total 90%) edited to 40%: the aggregate the
    // repository feeds in already excludes the record, so allocated is 60.
    assert!(AllocationInvariant::check("PO-2041", dec!(40), dec!(60)).is_ok());
}

#[test]
fn test_advance_duplicate_discrimination() {
    let first = FundRequestLedger::prepare_advance(&fields(advance_payload())).unwrap();
    let second = FundRequestLedger::prepare_advance(&fields(advance_payload())).unwrap();
    assert_eq!(first.duplicate_key(), second.duplicate_key());

    // Changing any one key field allows the request through.
    for (field, value) in [
        ("supplier_name", json!("Beta Ltd")),
        ("percentage", json!(35)),
        ("po_number", json!("PO-9999")),
        ("date_received", json!("2026-02-04")),
    ] {
        let mut payload = advance_payload();
        payload[field] = value;
        let changed = FundRequestLedger::prepare_advance(&fields(payload)).unwrap();
        assert_ne!(first.duplicate_key(), changed.duplicate_key(), "{field}");
    }
}

#[test]
fn test_duplicate_guard_end_to_end() {
    let draft = FundRequestLedger::prepare_advance(&fields(advance_payload())).unwrap();
    let key = draft.duplicate_key();
    // Second submission with the same key collides with the stored row.
    let err = DuplicateGuard::check(&key, &[41], None).unwrap_err();
    assert!(matches!(err, RequestError::DuplicateRequest(_)));
    // Editing row 41 itself does not.
    assert!(DuplicateGuard::check(&key, &[41], Some(41)).is_ok());
}

#[test]
fn test_supplier_create_pipeline() {
    let draft = FundRequestLedger::prepare_supplier(&fields(supplier_payload())).unwrap();
    assert_eq!(draft.amounts.vat, dec!(75.00));
    // Supplier family never deducts WHT, even on the 2.00% tier.
    assert_eq!(draft.amounts.wht, dec!(0));
    assert_eq!(draft.amounts.amount_payable, dec!(1055.00));
    assert_eq!(draft.amounts.gross_amount, dec!(1079.50));
    assert_eq!(draft.invoice_month, "Jan-2026");
    assert_eq!(draft.purchase_month, "Dec-2025");
    assert_eq!(draft.input.payment_status, PaymentStatus::Pending);
}

#[test]
fn test_supplier_requires_other_charges() {
    let mut payload = supplier_payload();
    payload.as_object_mut().unwrap().remove("other_charges");
    let err = FundRequestLedger::prepare_supplier(&fields(payload)).unwrap_err();
    assert!(matches!(err, RequestError::MissingField(f) if f == "other_charges"));
}

#[test]
fn test_expense_create_pipeline() {
    let draft = FundRequestLedger::prepare_expense(&fields(expense_payload())).unwrap();
    assert_eq!(draft.amounts.vat, dec!(75.00));
    assert_eq!(draft.amounts.wht, dec!(20.00));
    assert_eq!(draft.amounts.amount_payable, dec!(1055.00));
    assert_eq!(draft.claim_amount, dec!(527.50));
    assert_eq!(draft.invoice_month, "Jan-2026");
}

#[test]
fn test_expense_duplicate_key_is_invoice_and_supplier() {
    let draft = FundRequestLedger::prepare_expense(&fields(expense_payload())).unwrap();
    let err = DuplicateGuard::check(&draft.duplicate_key(), &[3], None).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("INV-90"));
    assert!(msg.contains("Acme Ltd"));
}

#[test]
fn test_discount_exceeding_amount_is_rejected() {
    let mut payload = advance_payload();
    payload["discount"] = json!(1200.00);
    let err = FundRequestLedger::prepare_advance(&fields(payload)).unwrap_err();
    assert!(matches!(err, RequestError::InvalidAmount { field, .. } if field == "discount"));
}

#[test]
fn test_inputs_are_normalized() {
    let mut payload = advance_payload();
    payload["supplier_name"] = json!("  Acme Ltd ");
    payload["amount"] = json!("1000.004");
    let draft = FundRequestLedger::prepare_advance(&fields(payload)).unwrap();
    assert_eq!(draft.input.supplier_name, "Acme Ltd");
    assert_eq!(draft.input.amount, dec!(1000.00));
}
