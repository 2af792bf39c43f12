//! Initial database migration.
//!
//! Creates the three fund request tables and the audit log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ADVANCE_REQUESTS_SQL).await?;
        db.execute_unprepared(SUPPLIER_REQUESTS_SQL).await?;
        db.execute_unprepared(EXPENSE_REQUESTS_SQL).await?;
        db.execute_unprepared(AUDIT_LOGS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS audit_logs, expense_requests, supplier_requests, \
             advance_requests CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const ADVANCE_REQUESTS_SQL: &str = r"
-- Advance payment requests: percentage draws against a purchase order
CREATE TABLE advance_requests (
    id BIGSERIAL PRIMARY KEY,
    supplier_name VARCHAR(255) NOT NULL,
    supplier_id VARCHAR(64) NOT NULL,
    site VARCHAR(255) NOT NULL,
    po_number VARCHAR(64) NOT NULL,
    date_received DATE NOT NULL,
    percentage NUMERIC(5,2) NOT NULL CHECK (percentage >= 0 AND percentage <= 100),
    amount NUMERIC(14,2) NOT NULL CHECK (amount >= 0),
    discount NUMERIC(14,2) NOT NULL DEFAULT 0 CHECK (discount >= 0),
    other_charges NUMERIC(14,2) NOT NULL DEFAULT 0 CHECK (other_charges >= 0),
    net_amount NUMERIC(14,2) NOT NULL CHECK (net_amount >= 0),
    vat NUMERIC(14,2) NOT NULL,
    wht NUMERIC(14,2) NOT NULL DEFAULT 0,
    amount_payable NUMERIC(14,2) NOT NULL,
    gross_amount NUMERIC(14,2) NOT NULL,
    advance_payment NUMERIC(14,2) NOT NULL,
    vat_policy VARCHAR(8) NOT NULL,
    payment_status VARCHAR(16) NOT NULL DEFAULT 'Pending',
    note TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Allocation aggregate reads by purchase order
CREATE INDEX idx_advance_requests_po ON advance_requests(po_number);

-- Duplicate lookup by the family's uniqueness key
CREATE INDEX idx_advance_requests_dup
    ON advance_requests(supplier_name, po_number, date_received);

-- Status dashboards
CREATE INDEX idx_advance_requests_status ON advance_requests(payment_status);
";

const SUPPLIER_REQUESTS_SQL: &str = r"
-- Supplier invoice settlement requests
CREATE TABLE supplier_requests (
    id BIGSERIAL PRIMARY KEY,
    supplier_name VARCHAR(255) NOT NULL,
    supplier_id VARCHAR(64) NOT NULL,
    invoice_number VARCHAR(64) NOT NULL,
    purchase_number VARCHAR(64) NOT NULL,
    po_number VARCHAR(64) NOT NULL,
    invoice_date DATE NOT NULL,
    purchase_date DATE NOT NULL,
    date_received DATE NOT NULL,
    invoice_month VARCHAR(8) NOT NULL,
    purchase_month VARCHAR(8) NOT NULL,
    project_code VARCHAR(64) NOT NULL,
    description TEXT NOT NULL,
    amount NUMERIC(14,2) NOT NULL CHECK (amount >= 0),
    discount NUMERIC(14,2) NOT NULL DEFAULT 0 CHECK (discount >= 0),
    other_charges NUMERIC(14,2) NOT NULL DEFAULT 0 CHECK (other_charges >= 0),
    net_amount NUMERIC(14,2) NOT NULL CHECK (net_amount >= 0),
    vat NUMERIC(14,2) NOT NULL,
    wht NUMERIC(14,2) NOT NULL DEFAULT 0,
    amount_payable NUMERIC(14,2) NOT NULL,
    gross_amount NUMERIC(14,2) NOT NULL,
    vat_policy VARCHAR(8) NOT NULL,
    payment_status VARCHAR(16) NOT NULL DEFAULT 'Pending',
    note TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Duplicate lookup: purchase numbers are unique per request
CREATE INDEX idx_supplier_requests_purchase_number
    ON supplier_requests(purchase_number);

CREATE INDEX idx_supplier_requests_status ON supplier_requests(payment_status);
CREATE INDEX idx_supplier_requests_month ON supplier_requests(invoice_month);
";

const EXPENSE_REQUESTS_SQL: &str = r"
-- Expense claim requests
CREATE TABLE expense_requests (
    id BIGSERIAL PRIMARY KEY,
    supplier_name VARCHAR(255) NOT NULL,
    supplier_id VARCHAR(64) NOT NULL,
    invoice_number VARCHAR(64) NOT NULL,
    invoice_date DATE NOT NULL,
    date_received DATE NOT NULL,
    invoice_month VARCHAR(8) NOT NULL,
    project_code VARCHAR(64) NOT NULL,
    description TEXT NOT NULL,
    classification VARCHAR(64) NOT NULL,
    percentage NUMERIC(5,2) NOT NULL CHECK (percentage >= 0 AND percentage <= 100),
    amount NUMERIC(14,2) NOT NULL CHECK (amount >= 0),
    discount NUMERIC(14,2) NOT NULL DEFAULT 0 CHECK (discount >= 0),
    other_charges NUMERIC(14,2) NOT NULL DEFAULT 0 CHECK (other_charges >= 0),
    net_amount NUMERIC(14,2) NOT NULL CHECK (net_amount >= 0),
    vat NUMERIC(14,2) NOT NULL,
    wht NUMERIC(14,2) NOT NULL DEFAULT 0,
    amount_payable NUMERIC(14,2) NOT NULL,
    gross_amount NUMERIC(14,2) NOT NULL,
    claim_amount NUMERIC(14,2) NOT NULL,
    vat_policy VARCHAR(8) NOT NULL,
    payment_status VARCHAR(16) NOT NULL DEFAULT 'Pending',
    note TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Duplicate lookup: an invoice number appears once per supplier
CREATE INDEX idx_expense_requests_dup
    ON expense_requests(invoice_number, supplier_name);

CREATE INDEX idx_expense_requests_status ON expense_requests(payment_status);
";

const AUDIT_LOGS_SQL: &str = r"
-- Audit trail, written inside the same transaction as the change it records
CREATE TABLE audit_logs (
    id BIGSERIAL PRIMARY KEY,
    actor_id BIGINT NOT NULL,
    actor_email VARCHAR(255) NOT NULL,
    action TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_audit_logs_actor ON audit_logs(actor_id, created_at DESC);
";
