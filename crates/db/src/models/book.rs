//! Book entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookshelf_core::types::DbId;

/// A row from the `books` table.
///
/// Wire shape is exactly `{id, title}`; the table's audit timestamps
/// are never selected or serialized.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
}

/// DTO for creating a new book. The title has already passed validation
/// by the time this is constructed.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub title: String,
}

/// DTO for updating an existing book. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
}
