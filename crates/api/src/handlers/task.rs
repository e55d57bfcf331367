//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kanban_core::error::CoreError;
use kanban_core::types::DbId;
use kanban_db::models::task::{CreateTask, TaskWithColumn, UpdateTask};
use kanban_db::repositories::{ColumnRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::today;
use crate::query::TaskListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

const UNKNOWN_COLUMN: &str = "The selected column_id is invalid.";

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

async fn load(state: &AppState, id: DbId) -> AppResult<TaskWithColumn> {
    TaskRepo::find_with_column(&state.pool, id, today())
        .await?
        .ok_or_else(|| task_not_found(id))
}

/// GET /api/tasks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<TaskWithColumn>>> {
    let (priority, progress) = params.into_parts()?;

    let tasks =
        TaskRepo::list_with_columns(&state.pool, priority.as_deref(), progress, today()).await?;
    tracing::debug!(count = tasks.len(), "Listed tasks");
    Ok(Json(tasks))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskWithColumn>)> {
    input.validate()?;

    let task = TaskRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| AppError::invalid_field("column_id", UNKNOWN_COLUMN))?;
    tracing::info!(task_id = task.id, column_id = task.column_id, order = task.order, "Task created");

    Ok((StatusCode::CREATED, Json(load(&state, task.id).await?)))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskWithColumn>> {
    Ok(Json(load(&state, id).await?))
}

/// PUT/PATCH /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskWithColumn>> {
    input.validate()?;

    if let Some(column_id) = input.column_id {
        if ColumnRepo::find_by_id(&state.pool, column_id).await?.is_none() {
            return Err(AppError::invalid_field("column_id", UNKNOWN_COLUMN));
        }
    }

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    tracing::info!(
        task_id = id,
        column_id = task.column_id,
        order = task.order,
        moved = input.is_move(),
        "Task updated"
    );

    Ok(Json(load(&state, id).await?))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !TaskRepo::delete(&state.pool, id).await? {
        return Err(task_not_found(id));
    }
    tracing::info!(task_id = id, "Task deleted");
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
