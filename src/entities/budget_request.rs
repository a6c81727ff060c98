//! Budget request entity - A customer's request for a price quote (orçamento).
//!
//! Records are created only from a normalized submission. Identifier and
//! timestamps are owned by storage; `deleted_at` is a tombstone that hides the
//! row from normal reads without erasing it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget request database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orcamentos")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the request was created
    pub created_at: DateTimeUtc,
    /// When the request was last modified
    pub updated_at: DateTimeUtc,
    /// Tombstone - when set, the request is logically deleted
    #[sea_orm(indexed)]
    #[serde(skip)]
    pub deleted_at: Option<DateTimeUtc>,
    /// Number of pieces requested, always at least 1
    pub quantity: i64,
    /// Free-text description of the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Customer name
    pub name: String,
    /// Opaque reference to an externally stored attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_ref: Option<String>,
    /// Customer email, syntax-checked on submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Customer phone
    pub phone: String,
}

/// Budget requests have no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the tombstone is set
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A validated submission that has not been stored yet.
///
/// Produced by [`crate::core::normalizer::normalize`]; storage turns it into a
/// [`Model`] by assigning the identifier and timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBudgetRequest {
    /// Customer name, never empty
    pub name: String,
    /// Customer phone, never empty
    pub phone: String,
    /// Customer email, `None` when not provided
    pub email: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Resolved piece count, always at least 1
    pub quantity: i64,
    /// Attachment reference, kept only when submitted as a string
    pub attachment_ref: Option<String>,
}
