//! `SeaORM` Entity for the supplier_requests table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A supplier invoice settlement request row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier_requests")]
pub struct Model {
    /// Storage-assigned id.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier display name.
    pub supplier_name: String,
    /// Supplier identifier.
    pub supplier_id: String,
    /// Supplier invoice number.
    pub invoice_number: String,
    /// Internal purchase number, unique per request.
    pub purchase_number: String,
    /// Purchase order reference.
    pub po_number: String,
    /// Invoice date.
    pub invoice_date: Date,
    /// Purchase date.
    pub purchase_date: Date,
    /// Date the request was received.
    pub date_received: Date,
    /// `MMM-YYYY` label of the invoice date.
    pub invoice_month: String,
    /// `MMM-YYYY` label of the purchase date.
    pub purchase_month: String,
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
    /// Derived: amount minus discount.
    pub net_amount: Decimal,
    /// Derived: value-added tax.
    pub vat: Decimal,
    /// Derived: withholding tax (always 0 for this family).
    pub wht: Decimal,
    /// Derived: amount payable before other charges.
    pub amount_payable: Decimal,
    /// Derived: amount payable plus other charges.
    pub gross_amount: Decimal,
    /// VAT policy code.
    pub vat_policy: String,
    /// Payment lifecycle state.
    pub payment_status: String,
    /// Free-form note.
    pub note: String,
    /// Insert timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last edit timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// No relations; suppliers and projects live in external systems.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
