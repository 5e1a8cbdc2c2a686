//! Domain models

pub mod entity_with_pagination;
pub mod pagination;

pub use entity_with_pagination::EntityWithPagination;
pub use pagination::{PageRequest, SortDirection, SortField, SortOrder};
