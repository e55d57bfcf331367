//! Repository for the `columns` table.

use std::collections::HashMap;

use kanban_core::column::DEFAULT_COLOR;
use kanban_core::ordering::{insertion_position, next_order};
use kanban_core::types::{Date, DbId};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::board::Board;
use crate::models::column::{Column, ColumnWithBoard, ColumnWithTasks, CreateColumn, UpdateColumn};
use crate::models::task::TaskView;
use crate::repositories::board_repo::COLUMNS as BOARD_COLUMNS;
use crate::repositories::TaskRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, board_id, name, color, \"order\", is_default, created_at, updated_at";

/// Provides CRUD and reordering operations for columns.
pub struct ColumnRepo;

impl ColumnRepo {
    /// Insert a user-defined column into a board.
    ///
    /// Without `input.order` the column is appended at `max(order) + 1`.
    /// With it, the column is inserted at that position (clamped to the
    /// valid range) and later columns shift up by one. The board row is
    /// locked so concurrent creates on the same board serialize.
    pub async fn create(
        pool: &PgPool,
        board_id: DbId,
        input: &CreateColumn,
    ) -> Result<Column, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM boards WHERE id = $1 FOR UPDATE")
            .bind(board_id)
            .fetch_one(&mut *tx)
            .await?;

        let (max_order, count): (i32, i64) = sqlx::query_as(
            "SELECT COALESCE(MAX(\"order\"), 0), COUNT(*) FROM columns WHERE board_id = $1",
        )
        .bind(board_id)
        .fetch_one(&mut *tx)
        .await?;

        let order = if input.order.is_some() {
            let position = insertion_position(input.order, count);
            sqlx::query(
                "UPDATE columns SET \"order\" = \"order\" + 1
                 WHERE board_id = $1 AND \"order\" >= $2",
            )
            .bind(board_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
            position
        } else {
            next_order(max_order)
        };

        let color = input.color.as_deref().unwrap_or(DEFAULT_COLOR);
        let column =
            Self::insert_in_tx(&mut tx, board_id, &input.name, color, order, false).await?;

        tx.commit().await?;
        Ok(column)
    }

    /// Insert a column row inside an existing transaction.
    pub(crate) async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        board_id: DbId,
        name: &str,
        color: &str,
        order: i32,
        is_default: bool,
    ) -> Result<Column, sqlx::Error> {
        let query = format!(
            "INSERT INTO columns (board_id, name, color, \"order\", is_default)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Column>(&query)
            .bind(board_id)
            .bind(name)
            .bind(color)
            .bind(order)
            .bind(is_default)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a column by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Column>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM columns WHERE id = $1");
        sqlx::query_as::<_, Column>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a column with its tasks in column order.
    pub async fn find_with_tasks(
        pool: &PgPool,
        id: DbId,
        today: Date,
    ) -> Result<Option<ColumnWithTasks>, sqlx::Error> {
        let Some(column) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let tasks = TaskRepo::list_for_column(pool, column.id).await?;
        Ok(Some(ColumnWithTasks {
            column,
            tasks: tasks.into_iter().map(|t| TaskView::new(t, today)).collect(),
        }))
    }

    /// List a board's columns ordered by `order`.
    pub async fn list_for_board(pool: &PgPool, board_id: DbId) -> Result<Vec<Column>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM columns WHERE board_id = $1 ORDER BY \"order\"");
        sqlx::query_as::<_, Column>(&query)
            .bind(board_id)
            .fetch_all(pool)
            .await
    }

    /// List a board's columns ordered by `order`, each with its tasks.
    pub async fn list_with_tasks(
        pool: &PgPool,
        board_id: DbId,
        today: Date,
    ) -> Result<Vec<ColumnWithTasks>, sqlx::Error> {
        let columns = Self::list_for_board(pool, board_id).await?;
        let mut result = Vec::with_capacity(columns.len());

        for column in columns {
            let tasks = TaskRepo::list_for_column(pool, column.id).await?;
            result.push(ColumnWithTasks {
                column,
                tasks: tasks.into_iter().map(|t| TaskView::new(t, today)).collect(),
            });
        }

        Ok(result)
    }

    /// Load the given columns with their boards attached, keyed by column id.
    pub async fn find_many_with_board(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, ColumnWithBoard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM columns WHERE id = ANY($1)");
        let columns = sqlx::query_as::<_, Column>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        let board_ids: Vec<DbId> = columns.iter().map(|c| c.board_id).collect();
        let query = format!("SELECT {BOARD_COLUMNS} FROM boards WHERE id = ANY($1)");
        let boards: HashMap<DbId, Board> = sqlx::query_as::<_, Board>(&query)
            .bind(&board_ids)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(columns
            .into_iter()
            .filter_map(|column| {
                let board = boards.get(&column.board_id)?.clone();
                Some((column.id, ColumnWithBoard { column, board }))
            })
            .collect())
    }

    /// Update a column. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateColumn,
    ) -> Result<Option<Column>, sqlx::Error> {
        let query = format!(
            "UPDATE columns SET
                name = COALESCE($2, name),
                color = COALESCE($3, color)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Column>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a column and its tasks, then close the gap in the board's order.
    ///
    /// Every column of the same board whose `order` was greater than the
    /// deleted one moves down by one. Returns `true` if the column existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some((board_id,)): Option<(DbId,)> =
            sqlx::query_as("SELECT board_id FROM columns WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(false);
        };

        sqlx::query("SELECT id FROM boards WHERE id = $1 FOR UPDATE")
            .bind(board_id)
            .execute(&mut *tx)
            .await?;

        // Re-read under the board lock; a concurrent delete may have won.
        let Some((deleted_order,)): Option<(i32,)> =
            sqlx::query_as("SELECT \"order\" FROM columns WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(false);
        };

        let tasks = TaskRepo::delete_for_column_in_tx(&mut tx, id).await?;

        sqlx::query("DELETE FROM columns WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let shifted = sqlx::query(
            "UPDATE columns SET \"order\" = \"order\" - 1
             WHERE board_id = $1 AND \"order\" > $2",
        )
        .bind(board_id)
        .bind(deleted_order)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        tracing::debug!(column_id = id, board_id, tasks, shifted, "Column deleted and board reindexed");
        Ok(true)
    }
}
