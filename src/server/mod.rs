//! Server initialization and routing

use crate::api;
use crate::cache::{CacheManager, CacheOperations};
use crate::config::Config;
use crate::middleware::ObservabilityLayer;
use crate::openapi;
use crate::repository::{entity_with_pagination::EntityWithPaginationRepositoryImpl, DbPool};
use crate::service::EntityWithPaginationService;
use crate::state::HasServices;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub entity_with_pagination_service:
        Arc<EntityWithPaginationService<EntityWithPaginationRepositoryImpl>>,
    pub cache: Option<Arc<dyn CacheOperations>>,
}

/// Implement HasServices trait for production AppState
impl HasServices for AppState {
    type EntityWithPaginationRepo = EntityWithPaginationRepositoryImpl;

    fn entity_with_pagination_service(
        &self,
    ) -> &EntityWithPaginationService<Self::EntityWithPaginationRepo> {
        &self.entity_with_pagination_service
    }

    async fn check_ready(&self) -> (bool, bool) {
        let db_ok = sqlx::query("SELECT 1")
            .execute(self.db_pool.inner())
            .await
            .is_ok();
        let cache_ok = match &self.cache {
            Some(cache) => cache.ping().await.is_ok(),
            None => true,
        };
        (db_ok, cache_ok)
    }
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    // Create database connection pool
    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");

    let cache: Option<Arc<dyn CacheOperations>> = match &config.redis {
        Some(redis) => {
            let manager = CacheManager::new(redis).await?;
            info!("Connected to Redis, entity cache enabled");
            Some(Arc::new(manager))
        }
        None => {
            info!("REDIS_URL not set, entity cache disabled");
            None
        }
    };

    let repo = Arc::new(EntityWithPaginationRepositoryImpl::new(pool.clone()));
    let entity_with_pagination_service =
        Arc::new(EntityWithPaginationService::new(repo, cache.clone()));
    info!(cache_enabled = config.cache_enabled(), "Services initialized");

    let state = AppState {
        db_pool: DbPool::new(pool),
        entity_with_pagination_service,
        cache,
    };

    let metrics_router = Router::new()
        .route("/metrics", get(api::metrics::metrics_handler))
        .with_state(Arc::new(prometheus_handle));

    let app = build_router(state).merge(metrics_router);

    let listener = TcpListener::bind(config.http_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.http_addr()))?;
    info!("HTTP server listening on {}", config.http_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Build the HTTP router
pub fn build_router<S: HasServices>(state: S) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // API documentation
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        // EntityWithPagination resource
        .route(
            api::entity_with_pagination::RESOURCE_PATH,
            get(api::entity_with_pagination::list::<S>)
                .post(api::entity_with_pagination::create::<S>)
                .put(api::entity_with_pagination::update::<S>),
        )
        .route(
            "/api/entity-with-paginations/{id}",
            get(api::entity_with_pagination::get::<S>)
                .delete(api::entity_with_pagination::delete::<S>),
        )
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(ObservabilityLayer)
        .with_state(state)
}
