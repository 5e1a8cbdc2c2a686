//! HTTP API Handler Tests Infrastructure
//!
//! `TestAppState` implements `HasServices` over the in-memory repository so
//! the production `build_router()` is exercised end to end.


use crate::api::{TestCache, TestEntityWithPaginationRepository};
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use entity_app::cache::CacheOperations;
use entity_app::server::build_router;
use entity_app::service::EntityWithPaginationService;
use entity_app::state::HasServices;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test App State
// ============================================================================

#[derive(Clone)]
pub struct TestAppState {
    pub entity_with_pagination_service:
        Arc<EntityWithPaginationService<TestEntityWithPaginationRepository>>,
    pub repo: Arc<TestEntityWithPaginationRepository>,
}

impl TestAppState {
    pub fn new() -> Self {
        Self::build(None)
    }

    pub fn with_cache(cache: Arc<dyn CacheOperations>) -> Self {
        Self::build(Some(cache))
    }

    fn build(cache: Option<Arc<dyn CacheOperations>>) -> Self {
        let repo = Arc::new(TestEntityWithPaginationRepository::new());
        let entity_with_pagination_service =
            Arc::new(EntityWithPaginationService::new(repo.clone(), cache));
        Self {
            entity_with_pagination_service,
            repo,
        }
    }
}

impl HasServices for TestAppState {
    type EntityWithPaginationRepo = TestEntityWithPaginationRepository;

    fn entity_with_pagination_service(
        &self,
    ) -> &EntityWithPaginationService<Self::EntityWithPaginationRepo> {
        &self.entity_with_pagination_service
    }

    async fn check_ready(&self) -> (bool, bool) {
        (true, true)
    }
}

pub fn build_test_router(state: TestAppState) -> Router {
    build_router(state)
}

/// Shared handles onto a cache-backed app.
pub fn cached_app() -> (Router, TestAppState, Arc<TestCache>) {
    let cache = Arc::new(TestCache::new());
    let state = TestAppState::with_cache(cache.clone());
    (build_test_router(state.clone()), state, cache)
}

// ============================================================================
// HTTP Request Helpers
// ============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        if self.body.is_empty() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, path: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json<T: Serialize>(app: &Router, path: &str, body: &T) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json<T: Serialize>(app: &Router, path: &str, body: &T) -> TestResponse {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, path: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
