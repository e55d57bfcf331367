//! Handlers for the `/boards` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kanban_core::error::CoreError;
use kanban_core::types::DbId;
use kanban_db::models::board::{Board, BoardDetail, BoardWithColumns, CreateBoard, UpdateBoard};
use kanban_db::models::task::TaskView;
use kanban_db::repositories::BoardRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::today;
use crate::query::BoardTaskParams;
use crate::response::{MessageResponse, StatusResponse};
use crate::state::AppState;

fn board_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Board",
        id,
    })
}

/// GET /api/boards
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Board>>> {
    let boards = BoardRepo::list(&state.pool).await?;
    tracing::debug!(count = boards.len(), "Listed boards");
    Ok(Json(boards))
}

/// POST /api/boards
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBoard>,
) -> AppResult<(StatusCode, Json<StatusResponse<BoardWithColumns>>)> {
    input.validate()?;

    let created = BoardRepo::create_with_default_columns(&state.pool, &input).await?;
    tracing::info!(board_id = created.board.id, "Board created with default columns");

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::success(
            "Board created successfully with default columns",
            created,
        )),
    ))
}

/// GET /api/boards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BoardDetail>> {
    let board = BoardRepo::find_detail(&state.pool, id, today())
        .await?
        .ok_or_else(|| board_not_found(id))?;
    Ok(Json(board))
}

/// PUT/PATCH /api/boards/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBoard>,
) -> AppResult<Json<Board>> {
    input.validate()?;

    let board = BoardRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| board_not_found(id))?;
    tracing::info!(board_id = id, "Board updated");
    Ok(Json(board))
}

/// DELETE /api/boards/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !BoardRepo::delete(&state.pool, id).await? {
        return Err(board_not_found(id));
    }
    tracing::info!(board_id = id, "Board deleted");
    Ok(Json(MessageResponse::new("Board deleted successfully")))
}

/// GET /api/boards/{id}/tasks
///
/// Every task of the board as one flat list, narrowed by the query filters.
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<BoardTaskParams>,
) -> AppResult<Json<Vec<TaskView>>> {
    let filter = params.into_filter()?;

    BoardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| board_not_found(id))?;

    let tasks = BoardRepo::list_tasks(&state.pool, id).await?;
    let today = today();
    let tasks: Vec<TaskView> = filter
        .apply(tasks)
        .into_iter()
        .map(|task| TaskView::new(task, today))
        .collect();

    tracing::debug!(board_id = id, count = tasks.len(), "Listed board tasks");
    Ok(Json(tasks))
}
