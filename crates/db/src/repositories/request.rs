//! Fund request repository: create and edit per family.
//!
//! Each operation runs validation and money derivation through the core
//! pipeline, then finishes inside one read-committed transaction: duplicate
//! lookup, allocation check (Advance family), write, and audit entry. An
//! early error return drops the transaction, which rolls it back.
//!
//! The Advance allocation check takes a per-PO advisory lock before reading
//! the percentage aggregate. Without it, two concurrent creates could each
//! observe headroom and both commit past the 100% cap.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    EntityTrait, IsolationLevel, QueryFilter, QuerySelect, Set, Statement, TransactionTrait,
};

use fundflow_core::RecordId;
use fundflow_core::error::RequestError;
use fundflow_core::request::{
    AdvanceDraft, AllocationInvariant, DuplicateGuard, ExpenseDraft, FieldMap, FundRequestLedger,
    RequestFamily, SupplierDraft,
};
use fundflow_shared::AuthContext;

use super::audit::AuditSink;
use crate::entities::{advance_requests, expense_requests, supplier_requests};

pub(crate) fn unavailable(err: DbErr) -> RequestError {
    RequestError::Repository(err.to_string())
}

/// Repository for fund request creation and edits.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    db: DatabaseConnection,
}

impl RequestRepository {
    /// Creates a new request repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self) -> Result<DatabaseTransaction, RequestError> {
        self.db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), None)
            .await
            .map_err(unavailable)
    }

    // ========================================================================
    // Advance family
    // ========================================================================

    /// Creates an Advance request from an inbound field map.
    ///
    /// # Errors
    ///
    /// Any validation error from the core taxonomy; `DuplicateRequest` or
    /// `AllocationExceeded` when the invariants reject; `Repository` on
    /// storage failure (rolled back).
    pub async fn create_advance(
        &self,
        fields: &FieldMap,
        actor: &AuthContext,
    ) -> Result<advance_requests::Model, RequestError> {
        let draft = FundRequestLedger::prepare_advance(fields)?;
        let txn = self.begin().await?;

        lock_po_aggregate(&txn, &draft.input.po_number).await?;
        let matches = advance_key_matches(&txn, &draft).await?;
        DuplicateGuard::check(&draft.duplicate_key(), &matches, None)?;
        let allocated = sum_advance_percentage(&txn, &draft.input.po_number, None).await?;
        AllocationInvariant::check(&draft.input.po_number, draft.input.percentage, allocated)?;

        let now = Utc::now().into();
        let mut model = advance_model(&draft, now);
        model.created_at = Set(now);
        let model = model.insert(&txn).await.map_err(unavailable)?;

        AuditSink::record(
            &txn,
            actor,
            RequestFamily::Advance.audit_created(&actor.actor_email, model.id),
        )
        .await
        .map_err(unavailable)?;
        txn.commit().await.map_err(unavailable)?;

        tracing::info!(id = model.id, po_number = %model.po_number, "advance request created");
        Ok(model)
    }

    /// Edits an Advance request, recomputing every money field.
    ///
    /// Duplicate and allocation aggregates exclude the edited record itself;
    /// the target row is locked for the duration of the transaction.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id does not exist, plus everything `create_advance`
    /// can return.
    pub async fn edit_advance(
        &self,
        id: RecordId,
        fields: &FieldMap,
        actor: &AuthContext,
    ) -> Result<advance_requests::Model, RequestError> {
        let draft = FundRequestLedger::prepare_advance(fields)?;
        let txn = self.begin().await?;

        lock_po_aggregate(&txn, &draft.input.po_number).await?;
        advance_requests::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| RequestError::NotFound(vec![id]))?;

        let matches = advance_key_matches(&txn, &draft).await?;
        DuplicateGuard::check(&draft.duplicate_key(), &matches, Some(id))?;
        let allocated = sum_advance_percentage(&txn, &draft.input.po_number, Some(id)).await?;
        AllocationInvariant::check(&draft.input.po_number, draft.input.percentage, allocated)?;

        let mut model = advance_model(&draft, Utc::now().into());
        model.id = Set(id);
        let model = model.update(&txn).await.map_err(unavailable)?;

        AuditSink::record(
            &txn,
            actor,
            RequestFamily::Advance.audit_updated(&actor.actor_email, id),
        )
        .await
        .map_err(unavailable)?;
        txn.commit().await.map_err(unavailable)?;

        tracing::info!(id, po_number = %model.po_number, "advance request updated");
        Ok(model)
    }

    // ========================================================================
    // Supplier family
    // ========================================================================

    /// Creates a Supplier request from an inbound field map.
    ///
    /// # Errors
    ///
    /// Any validation error from the core taxonomy; `DuplicateRequest` if
    /// the purchase number is taken; `Repository` on storage failure.
    pub async fn create_supplier(
        &self,
        fields: &FieldMap,
        actor: &AuthContext,
    ) -> Result<supplier_requests::Model, RequestError> {
        let draft = FundRequestLedger::prepare_supplier(fields)?;
        let txn = self.begin().await?;

        let matches = supplier_key_matches(&txn, &draft.input.purchase_number).await?;
        DuplicateGuard::check(&draft.duplicate_key(), &matches, None)?;

        let now = Utc::now().into();
        let mut model = supplier_model(&draft, now);
        model.created_at = Set(now);
        let model = model.insert(&txn).await.map_err(unavailable)?;

        AuditSink::record(
            &txn,
            actor,
            RequestFamily::Supplier.audit_created(&actor.actor_email, model.id),
        )
        .await
        .map_err(unavailable)?;
        txn.commit().await.map_err(unavailable)?;

        tracing::info!(id = model.id, purchase_number = %model.purchase_number, "supplier request created");
        Ok(model)
    }

    /// Edits a Supplier request, recomputing every money field.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id does not exist, plus everything
    /// `create_supplier` can return.
    pub async fn edit_supplier(
        &self,
        id: RecordId,
        fields: &FieldMap,
        actor: &AuthContext,
    ) -> Result<supplier_requests::Model, RequestError> {
        let draft = FundRequestLedger::prepare_supplier(fields)?;
        let txn = self.begin().await?;

        supplier_requests::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| RequestError::NotFound(vec![id]))?;

        let matches = supplier_key_matches(&txn, &draft.input.purchase_number).await?;
        DuplicateGuard::check(&draft.duplicate_key(), &matches, Some(id))?;

        let mut model = supplier_model(&draft, Utc::now().into());
        model.id = Set(id);
        let model = model.update(&txn).await.map_err(unavailable)?;

        AuditSink::record(
            &txn,
            actor,
            RequestFamily::Supplier.audit_updated(&actor.actor_email, id),
        )
        .await
        .map_err(unavailable)?;
        txn.commit().await.map_err(unavailable)?;

        tracing::info!(id, purchase_number = %model.purchase_number, "supplier request updated");
        Ok(model)
    }

    // ========================================================================
    // Expense family
    // ========================================================================

    /// Creates an Expense request from an inbound field map.
    ///
    /// # Errors
    ///
    /// Any validation error from the core taxonomy; `DuplicateRequest` if
    /// the invoice already exists for the supplier; `Repository` on storage
    /// failure.
    pub async fn create_expense(
        &self,
        fields: &FieldMap,
        actor: &AuthContext,
    ) -> Result<expense_requests::Model, RequestError> {
        let draft = FundRequestLedger::prepare_expense(fields)?;
        let txn = self.begin().await?;

        let matches =
            expense_key_matches(&txn, &draft.input.invoice_number, &draft.input.supplier_name)
                .await?;
        DuplicateGuard::check(&draft.duplicate_key(), &matches, None)?;

        let now = Utc::now().into();
        let mut model = expense_model(&draft, now);
        model.created_at = Set(now);
        let model = model.insert(&txn).await.map_err(unavailable)?;

        AuditSink::record(
            &txn,
            actor,
            RequestFamily::Expense.audit_created(&actor.actor_email, model.id),
        )
        .await
        .map_err(unavailable)?;
        txn.commit().await.map_err(unavailable)?;

        tracing::info!(id = model.id, invoice_number = %model.invoice_number, "expense request created");
        Ok(model)
    }

    /// Edits an Expense request, recomputing every money field.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id does not exist, plus everything `create_expense`
    /// can return.
    pub async fn edit_expense(
        &self,
        id: RecordId,
        fields: &FieldMap,
        actor: &AuthContext,
    ) -> Result<expense_requests::Model, RequestError> {
        let draft = FundRequestLedger::prepare_expense(fields)?;
        let txn = self.begin().await?;

        expense_requests::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| RequestError::NotFound(vec![id]))?;

        let matches =
            expense_key_matches(&txn, &draft.input.invoice_number, &draft.input.supplier_name)
                .await?;
        DuplicateGuard::check(&draft.duplicate_key(), &matches, Some(id))?;

        let mut model = expense_model(&draft, Utc::now().into());
        model.id = Set(id);
        let model = model.update(&txn).await.map_err(unavailable)?;

        AuditSink::record(
            &txn,
            actor,
            RequestFamily::Expense.audit_updated(&actor.actor_email, id),
        )
        .await
        .map_err(unavailable)?;
        txn.commit().await.map_err(unavailable)?;

        tracing::info!(id, invoice_number = %model.invoice_number, "expense request updated");
        Ok(model)
    }
}

/// Serializes allocation checks per purchase order.
///
/// `pg_advisory_xact_lock` holds until the transaction ends, so the
/// read-sum-then-insert sequence for one PO cannot interleave with another
/// transaction's. Row locks alone cannot close this race: a PO with no rows
/// yet has nothing to lock.
async fn lock_po_aggregate(
    txn: &DatabaseTransaction,
    po_number: &str,
) -> Result<(), RequestError> {
    use sea_orm::ConnectionTrait;

    txn.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtext($1)::bigint)",
        [po_number.into()],
    ))
    .await
    .map_err(unavailable)?;
    Ok(())
}

async fn advance_key_matches(
    txn: &DatabaseTransaction,
    draft: &AdvanceDraft,
) -> Result<Vec<RecordId>, RequestError> {
    advance_requests::Entity::find()
        .select_only()
        .column(advance_requests::Column::Id)
        .filter(advance_requests::Column::SupplierName.eq(draft.input.supplier_name.clone()))
        .filter(advance_requests::Column::Percentage.eq(draft.input.percentage))
        .filter(advance_requests::Column::PoNumber.eq(draft.input.po_number.clone()))
        .filter(advance_requests::Column::DateReceived.eq(draft.input.date_received))
        .into_tuple::<RecordId>()
        .all(txn)
        .await
        .map_err(unavailable)
}

async fn sum_advance_percentage(
    txn: &DatabaseTransaction,
    po_number: &str,
    exclude: Option<RecordId>,
) -> Result<Decimal, RequestError> {
    let mut query = advance_requests::Entity::find()
        .select_only()
        .column(advance_requests::Column::Percentage)
        .filter(advance_requests::Column::PoNumber.eq(po_number));
    if let Some(id) = exclude {
        query = query.filter(advance_requests::Column::Id.ne(id));
    }
    let percentages = query
        .into_tuple::<Decimal>()
        .all(txn)
        .await
        .map_err(unavailable)?;
    Ok(percentages.into_iter().sum())
}

async fn supplier_key_matches(
    txn: &DatabaseTransaction,
    purchase_number: &str,
) -> Result<Vec<RecordId>, RequestError> {
    supplier_requests::Entity::find()
        .select_only()
        .column(supplier_requests::Column::Id)
        .filter(supplier_requests::Column::PurchaseNumber.eq(purchase_number))
        .into_tuple::<RecordId>()
        .all(txn)
        .await
        .map_err(unavailable)
}

async fn expense_key_matches(
    txn: &DatabaseTransaction,
    invoice_number: &str,
    supplier_name: &str,
) -> Result<Vec<RecordId>, RequestError> {
    expense_requests::Entity::find()
        .select_only()
        .column(expense_requests::Column::Id)
        .filter(expense_requests::Column::InvoiceNumber.eq(invoice_number))
        .filter(expense_requests::Column::SupplierName.eq(supplier_name))
        .into_tuple::<RecordId>()
        .all(txn)
        .await
        .map_err(unavailable)
}

/// Active model with every column except `id` and `created_at` set.
fn advance_model(
    draft: &AdvanceDraft,
    now: sea_orm::prelude::DateTimeWithTimeZone,
) -> advance_requests::ActiveModel {
    advance_requests::ActiveModel {
        supplier_name: Set(draft.input.supplier_name.clone()),
        supplier_id: Set(draft.input.supplier_id.clone()),
        site: Set(draft.input.site.clone()),
        po_number: Set(draft.input.po_number.clone()),
        date_received: Set(draft.input.date_received),
        percentage: Set(draft.input.percentage),
        amount: Set(draft.input.amount),
        discount: Set(draft.input.discount),
        other_charges: Set(draft.input.other_charges),
        net_amount: Set(draft.amounts.net_amount),
        vat: Set(draft.amounts.vat),
        wht: Set(draft.amounts.wht),
        amount_payable: Set(draft.amounts.amount_payable),
        gross_amount: Set(draft.amounts.gross_amount),
        advance_payment: Set(draft.advance_payment),
        vat_policy: Set(draft.input.vat_policy.as_code().to_string()),
        payment_status: Set(draft.input.payment_status.as_str().to_string()),
        note: Set(draft.input.note.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
}

/// Active model with every column except `id` and `created_at` set.
fn supplier_model(
    draft: &SupplierDraft,
    now: sea_orm::prelude::DateTimeWithTimeZone,
) -> supplier_requests::ActiveModel {
    supplier_requests::ActiveModel {
        supplier_name: Set(draft.input.supplier_name.clone()),
        supplier_id: Set(draft.input.supplier_id.clone()),
        invoice_number: Set(draft.input.invoice_number.clone()),
        purchase_number: Set(draft.input.purchase_number.clone()),
        po_number: Set(draft.input.po_number.clone()),
        invoice_date: Set(draft.input.invoice_date),
        purchase_date: Set(draft.input.purchase_date),
        date_received: Set(draft.input.date_received),
        invoice_month: Set(draft.invoice_month.clone()),
        purchase_month: Set(draft.purchase_month.clone()),
        project_code: Set(draft.input.project_code.clone()),
        description: Set(draft.input.description.clone()),
        amount: Set(draft.input.amount),
        discount: Set(draft.input.discount),
        other_charges: Set(draft.input.other_charges),
        net_amount: Set(draft.amounts.net_amount),
        vat: Set(draft.amounts.vat),
        wht: Set(draft.amounts.wht),
        amount_payable: Set(draft.amounts.amount_payable),
        gross_amount: Set(draft.amounts.gross_amount),
        vat_policy: Set(draft.input.vat_policy.as_code().to_string()),
        payment_status: Set(draft.input.payment_status.as_str().to_string()),
        note: Set(draft.input.note.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
}

/// Active model with every column except `id` and `created_at` set.
fn expense_model(
    draft: &ExpenseDraft,
    now: sea_orm::prelude::DateTimeWithTimeZone,
) -> expense_requests::ActiveModel {
    expense_requests::ActiveModel {
        supplier_name: Set(draft.input.supplier_name.clone()),
        supplier_id: Set(draft.input.supplier_id.clone()),
        invoice_number: Set(draft.input.invoice_number.clone()),
        invoice_date: Set(draft.input.invoice_date),
        date_received: Set(draft.input.date_received),
        invoice_month: Set(draft.invoice_month.clone()),
        project_code: Set(draft.input.project_code.clone()),
        description: Set(draft.input.description.clone()),
        classification: Set(draft.input.classification.clone()),
        percentage: Set(draft.input.percentage),
        amount: Set(draft.input.amount),
        discount: Set(draft.input.discount),
        other_charges: Set(draft.input.other_charges),
        net_amount: Set(draft.amounts.net_amount),
        vat: Set(draft.amounts.vat),
        wht: Set(draft.amounts.wht),
        amount_payable: Set(draft.amounts.amount_payable),
        gross_amount: Set(draft.amounts.gross_amount),
        claim_amount: Set(draft.claim_amount),
        vat_policy: Set(draft.input.vat_policy.as_code().to_string()),
        payment_status: Set(draft.input.payment_status.as_str().to_string()),
        note: Set(draft.input.note.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
}
