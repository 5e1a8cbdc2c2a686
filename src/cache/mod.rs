//! Redis cache layer for loaded entities

use crate::config::RedisConfig;
use crate::domain::EntityWithPagination;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Cache key prefixes
mod keys {
    pub const ENTITY_WITH_PAGINATION: &str = "entity_app:entity_with_pagination";
}

/// Default TTLs
mod ttl {
    pub const ENTITY_SECS: u64 = 600; // 10 minutes
}

fn entity_key(id: i64) -> String {
    format!("{}:{}", keys::ENTITY_WITH_PAGINATION, id)
}

/// Cached copies of loaded rows.
///
/// Any write to a row must evict its copy first so a later read never
/// serves the stale state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheOperations: Send + Sync {
    async fn get_entity(&self, id: i64) -> Result<Option<EntityWithPagination>>;
    async fn set_entity(&self, entity: &EntityWithPagination) -> Result<()>;
    async fn evict_entity(&self, id: i64) -> Result<()>;
    async fn ping(&self) -> Result<()>;
}

/// Cache manager for Redis operations
#[derive(Clone)]
pub struct CacheManager {
    conn: ConnectionManager,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to connect to Redis: {}", e))
        })?;

        Ok(Self { conn })
    }

    /// Get a value from cache
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(v) => {
                let parsed = serde_json::from_str(&v).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("Cache deserialize error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with TTL
    async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let serialized = serde_json::to_string(value).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Cache serialize error: {}", e))
        })?;

        let _: () = conn.set_ex(key, serialized, ttl.as_secs()).await?;
        Ok(())
    }

    /// Delete a key from cache
    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }
}

#[async_trait]
impl CacheOperations for CacheManager {
    async fn get_entity(&self, id: i64) -> Result<Option<EntityWithPagination>> {
        self.get(&entity_key(id)).await
    }

    async fn set_entity(&self, entity: &EntityWithPagination) -> Result<()> {
        // Only saved rows have a key.
        let Some(id) = entity.id else {
            return Ok(());
        };
        self.set(
            &entity_key(id),
            entity,
            Duration::from_secs(ttl::ENTITY_SECS),
        )
        .await
    }

    async fn evict_entity(&self, id: i64) -> Result<()> {
        self.delete(&entity_key(id)).await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// Cache that never holds anything; used when Redis is not configured.
#[derive(Clone, Default)]
pub struct NoOpCacheManager;

impl NoOpCacheManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheOperations for NoOpCacheManager {
    async fn get_entity(&self, _id: i64) -> Result<Option<EntityWithPagination>> {
        Ok(None)
    }

    async fn set_entity(&self, _entity: &EntityWithPagination) -> Result<()> {
        Ok(())
    }

    async fn evict_entity(&self, _id: i64) -> Result<()> {
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
