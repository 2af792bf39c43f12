//! Audit log writer.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};

use fundflow_shared::AuthContext;

use crate::entities::audit_logs;

/// Writes audit trail entries.
///
/// Callers pass the transaction they are running in, so the entry commits
/// (or rolls back) together with the change it describes - exactly-once
/// audit for every applied mutation.
pub struct AuditSink;

impl AuditSink {
    /// Records an action on behalf of the actor.
    ///
    /// # Errors
    ///
    /// Returns the underlying database error; the caller's transaction
    /// should abort with it.
    pub async fn record<C: ConnectionTrait>(
        conn: &C,
        actor: &AuthContext,
        action: String,
    ) -> Result<audit_logs::Model, DbErr> {
        audit_logs::ActiveModel {
            actor_id: Set(actor.actor_id),
            actor_email: Set(actor.actor_email.clone()),
            action: Set(action),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(conn)
        .await
    }
}
