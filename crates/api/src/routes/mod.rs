pub mod books;
pub mod health;

use axum::Router;

use crate::policy::AuthPolicy;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /books          list, create
/// /books/{id}     get, update, delete
/// ```
pub fn api_routes(policy: AuthPolicy, state: &AppState) -> Router<AppState> {
    Router::new().nest("/books", books::router(policy, state))
}
