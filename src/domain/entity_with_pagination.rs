//! EntityWithPagination domain model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::hash::{Hash, Hasher};
use utoipa::ToSchema;
use validator::Validate;

/// Entity name used in alert headers and error details
pub const ENTITY_NAME: &str = "entityWithPagination";

/// Maximum stored length of `value` (VARCHAR(255))
pub const VALUE_MAX_LENGTH: usize = 255;

/// A persisted record with an optional database-assigned identifier.
///
/// Equality and hashing only look at `id`. An instance without an id is
/// equal to nothing but itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, Validate, ToSchema)]
pub struct EntityWithPagination {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(max = 255))]
    pub value: String,
}

impl EntityWithPagination {
    /// Transient entity that has not been saved yet
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl PartialEq for EntityWithPagination {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for EntityWithPagination {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
