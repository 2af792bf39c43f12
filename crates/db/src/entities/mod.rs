//! `SeaORM` entity definitions.

pub mod advance_requests;
pub mod audit_logs;
pub mod expense_requests;
pub mod supplier_requests;
