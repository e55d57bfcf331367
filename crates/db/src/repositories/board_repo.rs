//! Repository for the `boards` table.

use kanban_core::board::DEFAULT_COLUMNS;
use kanban_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::board::{Board, BoardDetail, BoardWithColumns, CreateBoard, UpdateBoard};
use crate::models::task::Task;
use crate::repositories::task_repo::PREFIXED_COLUMNS as TASK_COLUMNS;
use crate::repositories::{ColumnRepo, TaskRepo};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for boards.
pub struct BoardRepo;

impl BoardRepo {
    /// Insert a new board together with its three default columns.
    ///
    /// Board and columns commit together; a failure on any insert leaves
    /// nothing behind.
    pub async fn create_with_default_columns(
        pool: &PgPool,
        input: &CreateBoard,
    ) -> Result<BoardWithColumns, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO boards (name, description)
             VALUES ($1, COALESCE($2, ''))
             RETURNING {COLUMNS}"
        );
        let board = sqlx::query_as::<_, Board>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        let mut columns = Vec::with_capacity(DEFAULT_COLUMNS.len());
        for seed in DEFAULT_COLUMNS {
            let column = ColumnRepo::insert_in_tx(
                &mut tx, board.id, seed.name, seed.color, seed.order, true,
            )
            .await?;
            columns.push(column);
        }

        tx.commit().await?;
        Ok(BoardWithColumns { board, columns })
    }

    /// Find a board by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE id = $1");
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a board with its columns (in board order) and their tasks.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        today: Date,
    ) -> Result<Option<BoardDetail>, sqlx::Error> {
        let Some(board) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let columns = ColumnRepo::list_with_tasks(pool, board.id, today).await?;
        Ok(Some(BoardDetail { board, columns }))
    }

    /// List all boards in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards ORDER BY id");
        sqlx::query_as::<_, Board>(&query).fetch_all(pool).await
    }

    /// Every task of the board, columns in board order, tasks in column order.
    pub async fn list_tasks(pool: &PgPool, board_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS}
             FROM tasks t
             JOIN columns c ON c.id = t.column_id
             WHERE c.board_id = $1
             ORDER BY c.\"order\", t.\"order\""
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(board_id)
            .fetch_all(pool)
            .await
    }

    /// Update a board. `name` is always written; `description` only when supplied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBoard,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!(
            "UPDATE boards SET
                name = $2,
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a board and everything it contains. Returns `true` if the board existed.
    ///
    /// Tasks, then columns, then the board are removed in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> = sqlx::query_as("SELECT id FROM boards WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let tasks = TaskRepo::delete_for_board_in_tx(&mut tx, id).await?;
        let columns = sqlx::query("DELETE FROM columns WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(board_id = id, columns, tasks, "Board contents deleted");
        Ok(true)
    }
}
