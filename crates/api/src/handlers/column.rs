//! Handlers for columns, both board-scoped (`/boards/{id}/columns`) and
//! top-level (`/columns/{id}`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kanban_core::column::{check_delete, check_rename};
use kanban_core::error::CoreError;
use kanban_core::types::DbId;
use kanban_db::models::column::{Column, ColumnWithTasks, CreateColumn, UpdateColumn};
use kanban_db::repositories::{BoardRepo, ColumnRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::today;
use crate::response::{MessageResponse, StatusResponse};
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

async fn ensure_board_exists(state: &AppState, board_id: DbId) -> AppResult<()> {
    BoardRepo::find_by_id(&state.pool, board_id)
        .await?
        .ok_or_else(|| not_found("Board", board_id))?;
    Ok(())
}

/// GET /api/boards/{id}/columns
pub async fn list_by_board(
    State(state): State<AppState>,
    Path(board_id): Path<DbId>,
) -> AppResult<Json<Vec<ColumnWithTasks>>> {
    ensure_board_exists(&state, board_id).await?;

    let columns = ColumnRepo::list_with_tasks(&state.pool, board_id, today()).await?;
    tracing::debug!(board_id, count = columns.len(), "Listed columns");
    Ok(Json(columns))
}

/// POST /api/boards/{id}/columns
pub async fn create(
    State(state): State<AppState>,
    Path(board_id): Path<DbId>,
    Json(input): Json<CreateColumn>,
) -> AppResult<(StatusCode, Json<StatusResponse<Column>>)> {
    input.validate()?;
    ensure_board_exists(&state, board_id).await?;

    let column = ColumnRepo::create(&state.pool, board_id, &input)
        .await
        .map_err(|source| AppError::CreationFailed {
            message: "Failed to create column",
            source,
        })?;

    tracing::info!(board_id, column_id = column.id, order = column.order, "Column created");
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::success("Column created successfully", column)),
    ))
}

/// GET /api/columns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusResponse<ColumnWithTasks>>> {
    let column = ColumnRepo::find_with_tasks(&state.pool, id, today())
        .await
        .map_err(AppError::enveloped)?
        .ok_or_else(|| AppError::enveloped(not_found("Column", id)))?;
    Ok(Json(StatusResponse::success(
        "Column retrieved successfully",
        column,
    )))
}

/// PUT/PATCH /api/columns/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateColumn>,
) -> AppResult<Json<Column>> {
    input.validate()?;

    let current = ColumnRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Column", id))?;

    check_rename(
        current.kind(),
        state.config.protect_default_columns,
        &current.name,
        input.name.as_deref(),
    )
    .inspect_err(|_| tracing::warn!(column_id = id, "Rejected rename of default column"))?;

    let column = ColumnRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Column", id))?;
    tracing::info!(column_id = id, "Column updated");
    Ok(Json(column))
}

/// DELETE /api/columns/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let current = ColumnRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Column", id))?;

    check_delete(current.kind(), state.config.protect_default_columns)
        .inspect_err(|_| tracing::warn!(column_id = id, "Rejected delete of default column"))?;

    if !ColumnRepo::delete(&state.pool, id).await? {
        return Err(not_found("Column", id));
    }
    tracing::info!(column_id = id, board_id = current.board_id, "Column deleted");
    Ok(Json(MessageResponse::new("Column deleted successfully")))
}
