//! PostgreSQL-backed [`BookStore`] over the `books` table.

use async_trait::async_trait;
use sqlx::PgPool;

use bookshelf_core::types::DbId;

use crate::models::book::{Book, BookPatch, NewBook};
use crate::store::{BookStore, StoreError};

/// Column list shared across queries to avoid repetition. Timestamps
/// are excluded: they never cross the wire.
const COLUMNS: &str = "id, title";

/// Provides CRUD operations for books backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY id");
        let books = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Book>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, input: &NewBook) -> Result<Book, StoreError> {
        let query = format!("INSERT INTO books (title) VALUES ($1) RETURNING {COLUMNS}");
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .fetch_one(&self.pool)
            .await?;
        Ok(book)
    }

    /// Only non-`None` patch fields are applied; `updated_at` is bumped
    /// either way so the row records the write.
    async fn update(&self, id: DbId, patch: &BookPatch) -> Result<Option<Book>, StoreError> {
        let query = format!(
            "UPDATE books SET
                title = COALESCE($2, title),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&patch.title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn delete(&self, id: DbId) -> Result<Option<Book>, StoreError> {
        let query = format!("DELETE FROM books WHERE id = $1 RETURNING {COLUMNS}");
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
