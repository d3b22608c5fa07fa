use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::{AppConfig, StoreBackend};
use crate::handlers::{auth, movies};
use crate::middleware::require_token;
use crate::store::{memory::MemoryStore, postgres::PgStore, MovieStore, UserStore};

/// Shared per-process state handed to every handler: the configuration
/// and the store handles. No other cross-request state exists.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub movies: Arc<dyn MovieStore>,
    /// Set when the postgres backend is active, for health probing
    pg: Option<Arc<PgStore>>,
}

impl AppState {
    /// State over explicitly provided stores. Used by tests to run the
    /// full router against the in-memory backend.
    pub fn with_stores(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        movies: Arc<dyn MovieStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            users,
            movies,
            pg: None,
        }
    }
}

/// Build state with the backend the configuration selects.
pub async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("using in-memory store backend");
            let store = Arc::new(MemoryStore::new());
            Ok(AppState {
                config: Arc::new(config),
                users: store.clone(),
                movies: store,
                pg: None,
            })
        }
        StoreBackend::Postgres => {
            let url = config
                .store
                .database_url
                .clone()
                .context("DATABASE_URL is required for the postgres store backend")?;

            let store = Arc::new(PgStore::connect(&url, config.store.max_connections).await?);
            store.migrate().await.context("store migration failed")?;

            Ok(AppState {
                config: Arc::new(config),
                users: store.clone(),
                movies: store.clone(),
                pg: Some(store),
            })
        }
    }
}

/// Assemble the router. Movie routes sit behind the token-validating
/// middleware; signup, signin and the health probe stay public.
pub fn app(state: AppState) -> Router {
    let movie_routes = Router::new()
        .route(
            "/movies",
            get(movies::movies_get).post(movies::movies_post),
        )
        .route(
            "/movies/:title",
            get(movies::title_get)
                .put(movies::title_put)
                .delete(movies::title_delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_token));

    let mut router = Router::new()
        .route("/signup", post(auth::signup_post))
        .route("/signin", post(auth::signin_post))
        .route("/health", get(health))
        .merge(movie_routes)
        .layer(TraceLayer::new_for_http());

    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    if config.security.jwt_secret.is_empty() {
        warn!("SECRET_KEY is empty; signin and token validation will fail");
    }

    let bind_addr = format!("{}:{}", config.server.bind, config.server.port);
    let state = build_state(config).await?;
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!("listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match &state.pg {
        Some(pg) => match pg.ping().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": { "status": "ok", "store": "postgres" }
                })),
            ),
            Err(e) => {
                tracing::error!("store health check failed: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "success": false,
                        "data": { "status": "degraded", "store": "postgres" }
                    })),
                )
            }
        },
        None => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "store": "memory" }
            })),
        ),
    }
}
