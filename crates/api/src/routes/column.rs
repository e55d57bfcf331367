//! Route definitions for the `/columns` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::column;
use crate::state::AppState;

/// Routes mounted at `/columns`.
///
/// ```text
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(column::get_by_id)
            .put(column::update)
            .patch(column::update)
            .delete(column::delete),
    )
}
