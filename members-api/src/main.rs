//! # Members API Server
//!
//! HTTP front end for member registration.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - The hobby catalog for rendering the registration form
//! - Form-encoded member registration with field-level error reporting
//! - A health check covering the member store
//!
//! Members are stored in PostgreSQL when `DATABASE_URL` is set and in
//! process memory otherwise.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p members-api
//! ```

use members_api::app::{build_router, AppState};
use members_api::config::Config;
use members_shared::db::migrations::run_migrations;
use members_shared::db::pool::{create_pool, DatabaseConfig};
use members_shared::hobbies::HobbyCatalog;
use members_shared::store::{InMemoryMemberStore, MemberStore, PgMemberStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "members_api=debug,members_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Members API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let catalog = match &config.hobby_catalog_path {
        Some(path) => HobbyCatalog::from_file(path)?,
        None => HobbyCatalog::default(),
    };
    tracing::info!(hobbies = catalog.len(), "Hobby catalog ready");

    let store: Arc<dyn MemberStore> = match &config.database {
        Some(database) => {
            let pool = create_pool(DatabaseConfig {
                max_connections: database.max_connections,
                ..DatabaseConfig::from_url(database.url.clone())
            })
            .await?;
            run_migrations(&pool).await?;
            Arc::new(PgMemberStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; members are kept in memory");
            Arc::new(InMemoryMemberStore::new())
        }
    };

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, catalog, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
