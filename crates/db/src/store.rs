//! The repository seam for book persistence.
//!
//! Handlers depend on `Arc<dyn BookStore>`, never on a concrete backend,
//! so the PostgreSQL implementation can be swapped for the in-memory one
//! in tests without touching any handler code.

use async_trait::async_trait;

use bookshelf_core::types::DbId;

use crate::models::book::{Book, BookPatch, NewBook};

/// Errors surfaced by store implementations.
///
/// Callers treat every variant as an internal failure; details are for
/// the log, not the wire.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD operations over the book catalog.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ordered by id.
    async fn find_all(&self) -> Result<Vec<Book>, StoreError>;

    /// A single book, or `None` if the id is unknown.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Book>, StoreError>;

    /// Persist a new book and return it with its assigned id.
    async fn create(&self, input: &NewBook) -> Result<Book, StoreError>;

    /// Apply non-`None` patch fields. Returns `None` if the id is unknown.
    async fn update(&self, id: DbId, patch: &BookPatch) -> Result<Option<Book>, StoreError>;

    /// Remove a book, returning its last persisted state, or `None` if
    /// the id is unknown.
    async fn delete(&self, id: DbId) -> Result<Option<Book>, StoreError>;

    /// Cheap reachability probe for health reporting.
    async fn ping(&self) -> Result<(), StoreError>;
}
