//! Response envelope types for API handlers.

use serde::Serialize;

use bookshelf_db::models::book::Book;

/// The `{ "books": [...] }` envelope returned by the collection route.
///
/// Individual book responses are bare objects; only the listing wraps
/// its payload.
#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<Book>,
}
