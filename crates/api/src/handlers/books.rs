//! Handlers for the `/books` resource.
//!
//! Read misses answer 404, write misses answer 400. Both contracts
//! predate this service and are kept as-is; see the route table in
//! [`crate::routes::books`] for the full surface.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::Value;

use bookshelf_core::types::DbId;
use bookshelf_core::validation::{validate, FieldKind, FieldRule};
use bookshelf_db::models::book::{Book, BookPatch, NewBook};

use crate::auth::TokenClaims;
use crate::error::{AppError, AppResult};
use crate::extract::Payload;
use crate::response::BookList;
use crate::state::AppState;

/// Field rules applied to creation payloads.
const CREATE_RULES: &[FieldRule] = &[FieldRule {
    field: "title",
    kind: FieldKind::String,
    required: true,
    label: "A book title is required",
}];

/// GET /api/v1/books
pub async fn list(State(state): State<AppState>) -> AppResult<Json<BookList>> {
    let books = state.store.find_all().await?;
    Ok(Json(BookList { books }))
}

/// GET /api/v1/books/{id}
///
/// The id segment is matched as raw text; a segment that does not parse
/// as an integer behaves exactly like an id no book has.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let id: DbId = id.parse().map_err(|_| AppError::NotFound)?;

    let book = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(book))
}

/// POST /api/v1/books
///
/// Validates the payload against [`CREATE_RULES`], persists, and
/// replies 200 with the stored entity, assigned id included.
pub async fn create(
    State(state): State<AppState>,
    claims: Option<Extension<TokenClaims>>,
    Payload(payload): Payload<Value>,
) -> AppResult<Json<Book>> {
    let fields = payload
        .as_object()
        .ok_or_else(|| AppError::BadPayload("Expected a JSON object".to_string()))?;
    validate(fields, CREATE_RULES)?;

    if let Some(Extension(claims)) = &claims {
        tracing::debug!(sub = %claims.sub, "Authorized book creation");
    }

    // Validated above: title is a present, non-empty string.
    let title = fields
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let book = state.store.create(&NewBook { title }).await?;
    Ok(Json(book))
}

/// PUT /api/v1/books/{id}
///
/// An unknown or unparseable id answers 400, echoing the raw segment.
/// `title` is overwritten when present in the body, otherwise left
/// untouched. Update payloads are not validated.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(patch): Payload<BookPatch>,
) -> AppResult<Json<Book>> {
    let parsed: DbId = id.parse().map_err(|_| AppError::NoSuchBook(id.clone()))?;

    let book = state
        .store
        .update(parsed, &patch)
        .await?
        .ok_or(AppError::NoSuchBook(id))?;
    Ok(Json(book))
}

/// DELETE /api/v1/books/{id}
///
/// Same 400 contract as update. Replies with the removed entity's last
/// representation.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let parsed: DbId = id.parse().map_err(|_| AppError::NoSuchBook(id.clone()))?;

    let book = state
        .store
        .delete(parsed)
        .await?
        .ok_or(AppError::NoSuchBook(id))?;
    Ok(Json(book))
}
