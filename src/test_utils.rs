//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and building submissions with
//! sensible defaults.

use crate::{
    core::SeaOrmBudgetRequestRepository,
    entities::NewBudgetRequest,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a repository over a fresh in-memory database.
pub async fn setup_test_repository() -> Result<SeaOrmBudgetRequestRepository> {
    Ok(SeaOrmBudgetRequestRepository::new(setup_test_db().await?))
}

/// Builds a valid submission.
///
/// # Defaults
/// * `phone`: `"11 99999-0000"`
/// * `email`, `description`, `attachment_ref`: None
pub fn new_test_request(name: &str, quantity: i64) -> NewBudgetRequest {
    NewBudgetRequest {
        name: name.to_string(),
        phone: "11 99999-0000".to_string(),
        email: None,
        description: None,
        quantity,
        attachment_ref: None,
    }
}
