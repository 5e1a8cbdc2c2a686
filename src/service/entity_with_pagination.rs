//! EntityWithPagination business logic

use crate::cache::CacheOperations;
use crate::domain::entity_with_pagination::ENTITY_NAME;
use crate::domain::{EntityWithPagination, PageRequest};
use crate::error::{AppError, Result};
use crate::repository::EntityWithPaginationRepository;
use crate::telemetry::metrics::observe_entity_operation;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

pub struct EntityWithPaginationService<R: EntityWithPaginationRepository> {
    repo: Arc<R>,
    cache: Option<Arc<dyn CacheOperations>>,
}

impl<R: EntityWithPaginationRepository> EntityWithPaginationService<R> {
    pub fn new(repo: Arc<R>, cache: Option<Arc<dyn CacheOperations>>) -> Self {
        Self { repo, cache }
    }

    pub async fn create(&self, entity: EntityWithPagination) -> Result<EntityWithPagination> {
        let result = self.create_inner(entity).await;
        observe_entity_operation("create", result)
    }

    async fn create_inner(&self, entity: EntityWithPagination) -> Result<EntityWithPagination> {
        if !entity.is_new() {
            return Err(AppError::invalid_request(
                "A new entityWithPagination cannot already have an ID",
                ENTITY_NAME,
                "idexists",
            ));
        }
        entity.validate()?;

        let saved = self.repo.save(&entity).await?;
        debug!("Created EntityWithPagination {:?}", saved.id);
        self.cache_entity(&saved).await;
        Ok(saved)
    }

    /// One page of entities plus the total row count
    pub async fn list(&self, page: &PageRequest) -> Result<(Vec<EntityWithPagination>, i64)> {
        let result: Result<(Vec<EntityWithPagination>, i64)> = async {
            let entities = self.repo.find_page(page).await?;
            let total = self.repo.count().await?;
            Ok((entities, total))
        }
        .await;
        observe_entity_operation("list", result)
    }

    pub async fn get(&self, id: i64) -> Result<EntityWithPagination> {
        let result = self.get_inner(id).await;
        observe_entity_operation("get", result)
    }

    async fn get_inner(&self, id: i64) -> Result<EntityWithPagination> {
        if let Some(cache) = &self.cache {
            if let Ok(Some(entity)) = cache.get_entity(id).await {
                return Ok(entity);
            }
        }
        let entity = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("EntityWithPagination {} not found", id)))?;
        self.cache_entity(&entity).await;
        Ok(entity)
    }

    /// Full replacement of the row; a row that does not exist yet is created.
    pub async fn update(&self, entity: EntityWithPagination) -> Result<EntityWithPagination> {
        let result = self.update_inner(entity).await;
        observe_entity_operation("update", result)
    }

    async fn update_inner(&self, entity: EntityWithPagination) -> Result<EntityWithPagination> {
        let Some(id) = entity.id else {
            return Err(AppError::invalid_request(
                "Invalid id",
                ENTITY_NAME,
                "idnull",
            ));
        };
        entity.validate()?;

        // Detach the cached copy before the write, and drop anything a
        // concurrent read put back once the write has committed.
        self.evict(id).await;
        let existed = self.repo.exists_by_id(id).await?;
        let saved = self.repo.save_and_flush(&entity).await?;
        self.evict(id).await;
        if existed {
            debug!("Updated EntityWithPagination {}", id);
        } else {
            info!("EntityWithPagination {} did not exist; created by update", id);
        }
        Ok(saved)
    }

    /// Idempotent: deleting an absent row succeeds.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result: Result<()> = async {
            self.repo.delete_by_id(id).await?;
            self.evict(id).await;
            debug!("Deleted EntityWithPagination {}", id);
            Ok(())
        }
        .await;
        observe_entity_operation("delete", result)
    }

    async fn cache_entity(&self, entity: &EntityWithPagination) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set_entity(entity).await {
                warn!("Failed to cache EntityWithPagination {:?}: {}", entity.id, e);
            }
        }
    }

    async fn evict(&self, id: i64) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.evict_entity(id).await {
                warn!("Failed to evict EntityWithPagination {} from cache: {}", id, e);
            }
        }
    }
}
