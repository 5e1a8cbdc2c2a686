//! API integration tests infrastructure
//!
//! This module provides test utilities for API handler testing without
//! external dependencies (no database, no Redis).

pub mod http;

use async_trait::async_trait;
use entity_app::cache::CacheOperations;
use entity_app::domain::{EntityWithPagination, PageRequest};
use entity_app::error::Result;
use entity_app::repository::EntityWithPaginationRepository;
use std::collections::HashMap;
use tokio::sync::RwLock;

// ============================================================================
// Test Repository
// ============================================================================

/// In-memory table with MySQL-like auto-increment ids.
pub struct TestEntityWithPaginationRepository {
    rows: RwLock<Vec<EntityWithPagination>>,
    next_id: RwLock<i64>,
}

impl TestEntityWithPaginationRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(vec![]),
            next_id: RwLock::new(1),
        }
    }

    pub async fn add_entity(&self, value: &str) -> EntityWithPagination {
        self.save(&EntityWithPagination::new(value))
            .await
            .expect("in-memory save cannot fail")
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

impl Default for TestEntityWithPaginationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityWithPaginationRepository for TestEntityWithPaginationRepository {
    async fn save(&self, entity: &EntityWithPagination) -> Result<EntityWithPagination> {
        let mut rows = self.rows.write().await;
        let mut next_id = self.next_id.write().await;

        let saved = match entity.id {
            None => {
                let id = *next_id;
                *next_id += 1;
                entity.clone().with_id(id)
            }
            Some(id) => {
                if id >= *next_id {
                    *next_id = id + 1;
                }
                entity.clone()
            }
        };

        match rows.iter_mut().find(|r| r.id == saved.id) {
            Some(row) => row.value = saved.value.clone(),
            None => rows.push(saved.clone()),
        }
        Ok(saved)
    }

    async fn save_and_flush(&self, entity: &EntityWithPagination) -> Result<EntityWithPagination> {
        self.save(entity).await
    }

    async fn find_all(&self) -> Result<Vec<EntityWithPagination>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_page(&self, page: &PageRequest) -> Result<Vec<EntityWithPagination>> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| page.compare(a, b));
        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EntityWithPagination>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == Some(id)).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.rows.write().await.retain(|r| r.id != Some(id));
        Ok(())
    }
}

// ============================================================================
// Test Cache
// ============================================================================

/// Cache backed by a HashMap that records every eviction.
pub struct TestCache {
    entries: RwLock<HashMap<i64, EntityWithPagination>>,
    evictions: RwLock<Vec<i64>>,
}

impl TestCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            evictions: RwLock::new(vec![]),
        }
    }

    pub async fn cached(&self, id: i64) -> Option<EntityWithPagination> {
        self.entries.read().await.get(&id).cloned()
    }

    pub async fn evictions(&self) -> Vec<i64> {
        self.evictions.read().await.clone()
    }
}

impl Default for TestCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheOperations for TestCache {
    async fn get_entity(&self, id: i64) -> Result<Option<EntityWithPagination>> {
        Ok(self.cached(id).await)
    }

    async fn set_entity(&self, entity: &EntityWithPagination) -> Result<()> {
        if let Some(id) = entity.id {
            self.entries.write().await.insert(id, entity.clone());
        }
        Ok(())
    }

    async fn evict_entity(&self, id: i64) -> Result<()> {
        self.entries.write().await.remove(&id);
        self.evictions.write().await.push(id);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
