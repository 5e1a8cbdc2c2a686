//! Application state traits for dependency injection
//!
//! Handlers are generic over `HasServices` so the same code runs against
//! the production `AppState` and test implementations.

use crate::repository::EntityWithPaginationRepository;
use crate::service::EntityWithPaginationService;

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The entity repository type
    type EntityWithPaginationRepo: EntityWithPaginationRepository;

    /// Get the EntityWithPagination service
    fn entity_with_pagination_service(
        &self,
    ) -> &EntityWithPaginationService<Self::EntityWithPaginationRepo>;

    /// Check if the system is ready (database and cache are healthy)
    /// Returns (db_ok, cache_ok) tuple
    fn check_ready(&self) -> impl std::future::Future<Output = (bool, bool)> + Send;
}
