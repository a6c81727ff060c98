//! Budget request storage - The persistence port and its `SeaORM` implementation.
//!
//! The HTTP layer only talks to [`BudgetRequestRepository`]; the backing store is
//! picked when the application state is built. Deletes are soft: they stamp
//! `deleted_at` and every read filters tombstoned rows out.

use crate::entities::{BudgetRequest, NewBudgetRequest, budget_request};
use async_trait::async_trait;
use sea_orm::{QueryOrder, Set, prelude::*};
use thiserror::Error;
use tracing::{debug, instrument};

/// Failures reported by a [`BudgetRequestRepository`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// No live record has this id
    #[error("Budget request {id} not found")]
    NotFound {
        /// The id that was looked up
        id: i64,
    },

    /// The record would break a stored-record invariant
    #[error("Invalid budget request: {reason}")]
    InvalidRecord {
        /// Which invariant failed
        reason: String,
    },

    /// Underlying database failure
    #[error("{0}")]
    Database(#[from] DbErr),
}

/// Persistence operations for budget requests.
#[async_trait]
pub trait BudgetRequestRepository: Send + Sync {
    /// Stores a new request, assigning its id and timestamps.
    async fn create(
        &self,
        request: NewBudgetRequest,
    ) -> Result<budget_request::Model, StorageError>;

    /// Fetches one live request.
    async fn get_by_id(&self, id: i64) -> Result<budget_request::Model, StorageError>;

    /// Fetches every live request.
    async fn get_all(&self) -> Result<Vec<budget_request::Model>, StorageError>;

    /// Rewrites the mutable fields of a live request.
    async fn update(&self, request: budget_request::Model) -> Result<(), StorageError>;

    /// Tombstones a live request.
    async fn delete(&self, id: i64) -> Result<(), StorageError>;
}

/// [`BudgetRequestRepository`] backed by a `SeaORM` connection pool.
#[derive(Debug)]
pub struct SeaOrmBudgetRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmBudgetRequestRepository {
    /// Wraps an established connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_live(&self, id: i64) -> Result<budget_request::Model, StorageError> {
        BudgetRequest::find_by_id(id)
            .filter(budget_request::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(StorageError::NotFound { id })
    }
}

#[async_trait]
impl BudgetRequestRepository for SeaOrmBudgetRequestRepository {
    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create(
        &self,
        request: NewBudgetRequest,
    ) -> Result<budget_request::Model, StorageError> {
        check_invariants(&request.name, &request.phone, request.quantity)?;

        let now = chrono::Utc::now();
        let record = budget_request::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            quantity: Set(request.quantity),
            description: Set(request.description),
            name: Set(request.name),
            attachment_ref: Set(request.attachment_ref),
            email: Set(request.email),
            phone: Set(request.phone),
            ..Default::default()
        };

        let created = record.insert(&self.db).await?;
        debug!(id = created.id, "Budget request inserted");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<budget_request::Model, StorageError> {
        self.find_live(id).await
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<budget_request::Model>, StorageError> {
        BudgetRequest::find()
            .filter(budget_request::Column::DeletedAt.is_null())
            .order_by_asc(budget_request::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self, request), fields(id = request.id))]
    async fn update(&self, request: budget_request::Model) -> Result<(), StorageError> {
        check_invariants(&request.name, &request.phone, request.quantity)?;

        let mut record: budget_request::ActiveModel = self.find_live(request.id).await?.into();
        record.quantity = Set(request.quantity);
        record.description = Set(request.description);
        record.name = Set(request.name);
        record.attachment_ref = Set(request.attachment_ref);
        record.email = Set(request.email);
        record.phone = Set(request.phone);
        record.updated_at = Set(chrono::Utc::now());

        record.update(&self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut record: budget_request::ActiveModel = self.find_live(id).await?.into();
        let now = chrono::Utc::now();
        record.deleted_at = Set(Some(now));
        record.updated_at = Set(now);

        record.update(&self.db).await?;
        Ok(())
    }
}

fn check_invariants(name: &str, phone: &str, quantity: i64) -> Result<(), StorageError> {
    let reason = if quantity < 1 {
        "quantity must be at least 1"
    } else if name.is_empty() {
        "name must not be empty"
    } else if phone.is_empty() {
        "phone must not be empty"
    } else {
        return Ok(());
    };

    Err(StorageError::InvalidRecord {
        reason: reason.to_string(),
    })
}
