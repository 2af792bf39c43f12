//! Fund request validation, normalization, and cross-record invariants.

pub mod allocation;
pub mod dedup;
pub mod fields;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use allocation::AllocationInvariant;
pub use dedup::DuplicateGuard;
pub use fields::FieldMap;
pub use service::FundRequestLedger;
pub use types::{
    AdvanceDraft, AdvanceInput, DuplicateKey, ExpenseDraft, ExpenseInput, PaymentStatus,
    RequestFamily, SupplierDraft, SupplierInput, month_label,
};
