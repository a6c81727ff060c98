//! Database configuration module.
//!
//! Opens the `SeaORM` connection pool and creates the schema from the entity
//! definitions with `Schema::create_table_from_entity`, so the tables always
//! match the Rust structs without hand-written SQL.

use crate::config::settings::DatabaseSettings;
use crate::entities::BudgetRequest;
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Establishes the connection pool described by `settings`.
#[instrument(skip(settings), fields(host = %settings.host))]
pub async fn create_connection(settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    let url = settings.connection_url();
    let in_memory = url.contains(":memory:");

    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);
    if in_memory {
        // Every connection to sqlite::memory: is its own database
        options.max_connections(1).min_connections(1);
    } else {
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .max_lifetime(settings.max_lifetime);
    }

    let db = Database::connect(options).await?;
    db.ping().await?;
    info!(backend = ?db.get_database_backend(), "Database connection established");
    Ok(db)
}

/// Creates the `orcamentos` table and its tombstone index if they do not exist.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut table = schema.create_table_from_entity(BudgetRequest);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(BudgetRequest) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    debug!("Budget request schema ensured");
    Ok(())
}
