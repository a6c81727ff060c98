use dotenvy::dotenv;
use orcamento_api::{
    api::{AppState, app_router},
    config::{
        AppConfig,
        database::{create_connection, create_tables},
    },
    core::SeaOrmBudgetRequestRepository,
    errors::Result,
    logging::init_tracing,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env before reading any configuration
    let dotenv_loaded = dotenv().is_ok();

    // 2. Load configuration and initialize tracing
    let config = AppConfig::from_env();
    init_tracing(&config.log_level, &config.log_format);
    if !dotenv_loaded {
        info!("No .env file found, using system environment variables");
    }

    // 3. Connect and ensure the schema exists
    let db = create_connection(&config.database)
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to run migrations: {}", e))?;

    // 4. Wire collaborators into the router
    let repository = Arc::new(SeaOrmBudgetRequestRepository::new(db));
    let state = AppState::new(repository);
    let router = app_router(state, &config);

    // 5. Serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", addr, e))?;
    info!(
        app = %config.app_name,
        port = config.port,
        environment = %config.environment,
        "Starting server"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
