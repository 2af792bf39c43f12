//! Bulk payment-status updates.
//!
//! The whole batch is one atomic unit: existence pre-check, row updates and
//! the audit entry either all commit or none do. A batch referencing any
//! missing id aborts before touching a single row and reports exactly the
//! missing ids.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, IsolationLevel,
    QueryFilter, QuerySelect, TransactionTrait,
};

use fundflow_core::RecordId;
use fundflow_core::error::RequestError;
use fundflow_core::request::{PaymentStatus, RequestFamily};
use fundflow_core::status::StatusTransition;
use fundflow_shared::AuthContext;

use super::audit::AuditSink;
use super::request::unavailable;
use crate::entities::{advance_requests, expense_requests, supplier_requests};

/// Repository for bulk payment-status transitions.
#[derive(Debug, Clone)]
pub struct StatusRepository {
    db: DatabaseConnection,
}

impl StatusRepository {
    /// Creates a new status repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Moves every referenced request to `status`, atomically.
    ///
    /// Returns the number of rows updated.
    ///
    /// # Errors
    ///
    /// - 400-class batch validation errors (empty, over the cap, unknown
    ///   status)
    /// - [`RequestError::NotFound`] listing exactly the missing ids; no row
    ///   is changed in that case
    /// - [`RequestError::Repository`] on storage failure, after rollback
    pub async fn update_status(
        &self,
        family: RequestFamily,
        ids: &[RecordId],
        status: &str,
        actor: &AuthContext,
    ) -> Result<u64, RequestError> {
        let status = StatusTransition::validate(ids, status)?;

        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), None)
            .await
            .map_err(unavailable)?;

        let existing = find_existing_ids(&txn, family, ids).await?;
        let missing = StatusTransition::missing_ids(ids, &existing);
        if !missing.is_empty() {
            // Dropping the transaction rolls it back.
            return Err(RequestError::NotFound(missing));
        }

        let updated = apply_status(&txn, family, ids, status).await?;

        AuditSink::record(
            &txn,
            actor,
            StatusTransition::audit_batch(family, &actor.actor_email, status, ids),
        )
        .await
        .map_err(unavailable)?;
        txn.commit().await.map_err(unavailable)?;

        tracing::info!(
            family = family.ledger_label(),
            status = %status,
            count = updated,
            "payment status batch updated"
        );
        Ok(updated)
    }
}

async fn find_existing_ids(
    txn: &DatabaseTransaction,
    family: RequestFamily,
    ids: &[RecordId],
) -> Result<Vec<RecordId>, RequestError> {
    let ids = ids.to_vec();
    match family {
        RequestFamily::Advance => {
            advance_requests::Entity::find()
                .select_only()
                .column(advance_requests::Column::Id)
                .filter(advance_requests::Column::Id.is_in(ids))
                .into_tuple::<RecordId>()
                .all(txn)
                .await
        }
        RequestFamily::Supplier => {
            supplier_requests::Entity::find()
                .select_only()
                .column(supplier_requests::Column::Id)
                .filter(supplier_requests::Column::Id.is_in(ids))
                .into_tuple::<RecordId>()
                .all(txn)
                .await
        }
        RequestFamily::Expense => {
            expense_requests::Entity::find()
                .select_only()
                .column(expense_requests::Column::Id)
                .filter(expense_requests::Column::Id.is_in(ids))
                .into_tuple::<RecordId>()
                .all(txn)
                .await
        }
    }
    .map_err(unavailable)
}

async fn apply_status(
    txn: &DatabaseTransaction,
    family: RequestFamily,
    ids: &[RecordId],
    status: PaymentStatus,
) -> Result<u64, RequestError> {
    let ids = ids.to_vec();
    let result = match family {
        RequestFamily::Advance => {
            advance_requests::Entity::update_many()
                .col_expr(
                    advance_requests::Column::PaymentStatus,
                    Expr::value(status.as_str()),
                )
                .filter(advance_requests::Column::Id.is_in(ids))
                .exec(txn)
                .await
        }
        RequestFamily::Supplier => {
            supplier_requests::Entity::update_many()
                .col_expr(
                    supplier_requests::Column::PaymentStatus,
                    Expr::value(status.as_str()),
                )
                .filter(supplier_requests::Column::Id.is_in(ids))
                .exec(txn)
                .await
        }
        RequestFamily::Expense => {
            expense_requests::Entity::update_many()
                .col_expr(
                    expense_requests::Column::PaymentStatus,
                    Expr::value(status.as_str()),
                )
                .filter(expense_requests::Column::Id.is_in(ids))
                .exec(txn)
                .await
        }
    }
    .map_err(unavailable)?;
    Ok(result.rows_affected)
}
