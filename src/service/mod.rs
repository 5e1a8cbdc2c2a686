//! Business logic layer

pub mod entity_with_pagination;

pub use entity_with_pagination::EntityWithPaginationService;
