//! `SeaORM` Entity for the audit_logs table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One audit trail entry per mutating operation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    /// Storage-assigned id.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Acting user's id.
    pub actor_id: i64,
    /// Acting user's email.
    pub actor_email: String,
    /// What happened, in the actor's words.
    pub action: String,
    /// When the entry was written.
    pub created_at: DateTimeWithTimeZone,
}

/// Audit entries reference users in the external directory only.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
