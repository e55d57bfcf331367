//! Route definitions for the `/boards` resource.
//!
//! Also carries the board-scoped column routes under `/boards/{id}/columns`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{board, column};
use crate::state::AppState;

/// Routes mounted at `/boards`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/tasks       -> list_tasks
/// GET    /{id}/columns     -> column::list_by_board
/// POST   /{id}/columns     -> column::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(board::list).post(board::create))
        .route(
            "/{id}",
            get(board::get_by_id)
                .put(board::update)
                .patch(board::update)
                .delete(board::delete),
        )
        .route("/{id}/tasks", get(board::list_tasks))
        .route(
            "/{id}/columns",
            get(column::list_by_board).post(column::create),
        )
}
