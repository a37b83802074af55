/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use members_api::app::{build_router, AppState};
/// use members_api::config::Config;
/// use members_shared::hobbies::HobbyCatalog;
/// use members_shared::store::InMemoryMemberStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let state = AppState::new(
///     Arc::new(InMemoryMemberStore::new()),
///     HobbyCatalog::default(),
///     Config::default(),
/// );
///
/// let app = build_router(state);
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use members_shared::hobbies::HobbyCatalog;
use members_shared::store::MemberStore;
use members_shared::validation::Validator;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Member store
    pub store: Arc<dyn MemberStore>,

    /// Registration validator, bound to `catalog`
    pub validator: Arc<Validator>,

    /// Hobby catalog
    pub catalog: Arc<HobbyCatalog>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn MemberStore>, catalog: HobbyCatalog, config: Config) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            store,
            validator: Arc::new(Validator::new(catalog.clone())),
            catalog,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health              # Health check
/// └── /v1/
///     ├── GET  /hobbies         # Hobby catalog
///     └── POST /members         # Member registration (form-encoded)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let v1_routes = Router::new()
        .route("/hobbies", get(routes::hobbies::list_hobbies))
        .route("/members", post(routes::members::register_member));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use members_shared::store::InMemoryMemberStore;

    #[test]
    fn test_app_state_shares_catalog_with_validator() {
        let state = AppState::new(
            Arc::new(InMemoryMemberStore::new()),
            HobbyCatalog::default(),
            Config::default(),
        );

        assert_eq!(state.validator.catalog(), state.catalog.as_ref());
    }
}
