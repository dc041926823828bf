//! Route definitions for the books collection.
//!
//! Which routes sit behind the bearer-token gate is decided here, once,
//! from the [`AuthPolicy`]; handlers never consult the policy themselves.

use axum::middleware as axum_middleware;
use axum::routing::{delete, get, post, put, MethodRouter};
use axum::Router;

use crate::handlers::books;
use crate::middleware::auth::require_bearer;
use crate::policy::{AuthPolicy, BookRoute};
use crate::state::AppState;

/// Routes mounted at `/books`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (gated under the default policy)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router(policy: AuthPolicy, state: &AppState) -> Router<AppState> {
    let gate = axum_middleware::from_fn_with_state(state.clone(), require_bearer);

    let table: [(BookRoute, &str, MethodRouter<AppState>); 5] = [
        (BookRoute::List, "/", get(books::list)),
        (BookRoute::Create, "/", post(books::create)),
        (BookRoute::Get, "/{id}", get(books::get_by_id)),
        (BookRoute::Update, "/{id}", put(books::update)),
        (BookRoute::Delete, "/{id}", delete(books::delete)),
    ];

    let mut router = Router::new();
    for (route, path, handler) in table {
        let handler = if policy.requires_token(route) {
            handler.route_layer(gate.clone())
        } else {
            handler
        };
        router = router.route(path, handler);
    }
    router
}
