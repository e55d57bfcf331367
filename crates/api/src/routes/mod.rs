pub mod board;
pub mod column;
pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /boards                          list, create
/// /boards/{id}                     get, update, delete
/// /boards/{id}/tasks               flattened task list with filters
/// /boards/{id}/columns             list, create
///
/// /columns/{id}                    get, update, delete
///
/// /tasks                           list (filtered), create
/// /tasks/{id}                      get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/boards", board::router())
        .nest("/columns", column::router())
        .nest("/tasks", task::router())
}
