//! `SeaORM` Entity for the advance_requests table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An advance payment request row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "advance_requests")]
pub struct Model {
    /// Storage-assigned id.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier display name.
    pub supplier_name: String,
    /// Supplier identifier.
    pub supplier_id: String,
    /// Site / project code.
    pub site: String,
    /// Purchase order the advance draws against.
    pub po_number: String,
    /// Date the request was received.
    pub date_received: Date,
    /// Share of the PO's gross value advanced (0-100).
    pub percentage: Decimal,
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
    /// Derived: gross amount × percentage / 100.
    pub advance_payment: Decimal,
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

/// No relations; suppliers and purchase orders live in external systems.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
