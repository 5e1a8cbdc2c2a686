//! EntityWithPagination repository

use crate::domain::{EntityWithPagination, PageRequest};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityWithPaginationRepository: Send + Sync {
    /// Insert when `id` is unset, otherwise replace the row (created if absent).
    async fn save(&self, entity: &EntityWithPagination) -> Result<EntityWithPagination>;
    /// Like `save`, but the write is committed and re-read before returning.
    async fn save_and_flush(&self, entity: &EntityWithPagination) -> Result<EntityWithPagination>;
    async fn find_all(&self) -> Result<Vec<EntityWithPagination>>;
    async fn find_page(&self, page: &PageRequest) -> Result<Vec<EntityWithPagination>>;
    async fn count(&self) -> Result<i64>;
    async fn find_by_id(&self, id: i64) -> Result<Option<EntityWithPagination>>;
    async fn exists_by_id(&self, id: i64) -> Result<bool>;
    /// Removing an absent row is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

pub struct EntityWithPaginationRepositoryImpl {
    pool: MySqlPool,
}

impl EntityWithPaginationRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn write(
        tx: &mut Transaction<'_, MySql>,
        entity: &EntityWithPagination,
    ) -> Result<i64> {
        match entity.id {
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO entity_with_pagination (value)
                    VALUES (?)
                    "#,
                )
                .bind(&entity.value)
                .execute(&mut **tx)
                .await?;

                i64::try_from(result.last_insert_id()).map_err(|e| AppError::Internal(e.into()))
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO entity_with_pagination (id, value)
                    VALUES (?, ?)
                    ON DUPLICATE KEY UPDATE value = VALUES(value)
                    "#,
                )
                .bind(id)
                .bind(&entity.value)
                .execute(&mut **tx)
                .await?;

                Ok(id)
            }
        }
    }
}

#[async_trait]
impl EntityWithPaginationRepository for EntityWithPaginationRepositoryImpl {
    async fn save(&self, entity: &EntityWithPagination) -> Result<EntityWithPagination> {
        // Dropping the transaction on an early return rolls it back.
        let mut tx = self.pool.begin().await?;
        let id = Self::write(&mut tx, entity).await?;

        let saved = sqlx::query_as::<_, EntityWithPagination>(
            r#"
            SELECT id, value
            FROM entity_with_pagination
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Failed to save EntityWithPagination {}", id))
        })?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn save_and_flush(&self, entity: &EntityWithPagination) -> Result<EntityWithPagination> {
        let mut tx = self.pool.begin().await?;
        let id = Self::write(&mut tx, entity).await?;
        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Failed to flush EntityWithPagination {}", id))
        })
    }

    async fn find_all(&self) -> Result<Vec<EntityWithPagination>> {
        let entities = sqlx::query_as::<_, EntityWithPagination>(
            r#"
            SELECT id, value
            FROM entity_with_pagination
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entities)
    }

    async fn find_page(&self, page: &PageRequest) -> Result<Vec<EntityWithPagination>> {
        // order_by_clause only emits whitelisted column names.
        let sql = format!(
            "SELECT id, value FROM entity_with_pagination {} LIMIT ? OFFSET ?",
            page.order_by_clause()
        );

        let entities = sqlx::query_as::<_, EntityWithPagination>(&sql)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(entities)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entity_with_pagination")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EntityWithPagination>> {
        let entity = sqlx::query_as::<_, EntityWithPagination>(
            r#"
            SELECT id, value
            FROM entity_with_pagination
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM entity_with_pagination WHERE id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0 > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM entity_with_pagination WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            tracing::debug!("EntityWithPagination {} already absent", id);
        }

        Ok(())
    }
}
