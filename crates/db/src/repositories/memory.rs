//! In-memory [`BookStore`] used by tests and by deployments that want a
//! throwaway catalog. Mirrors the PostgreSQL semantics: monotonic ids
//! that are never reused, patch fields applied only when present, and
//! delete returning the removed row.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use bookshelf_core::types::DbId;

use crate::models::book::{Book, BookPatch, NewBook};
use crate::store::{BookStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    books: BTreeMap<DbId, Book>,
    next_id: DbId,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            books: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        let inner = self.inner.read().await;
        // BTreeMap iteration order gives the same id ordering as the
        // SQL `ORDER BY id`.
        Ok(inner.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Book>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.books.get(&id).cloned())
    }

    async fn create(&self, input: &NewBook) -> Result<Book, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let book = Book {
            id,
            title: input.title.clone(),
        };
        inner.books.insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: DbId, patch: &BookPatch) -> Result<Option<Book>, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.books.get_mut(&id) {
            Some(book) => {
                if let Some(title) = &patch.title {
                    book.title = title.clone();
                }
                Ok(Some(book.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: DbId) -> Result<Option<Book>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.books.remove(&id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
