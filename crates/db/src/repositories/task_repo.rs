//! Repository for the `tasks` table.

use kanban_core::ordering::{insertion_position, next_order};
use kanban_core::task::{TaskPriority, DEFAULT_CREATED_BY};
use kanban_core::types::{Date, DbId};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::task::{CreateTask, Task, TaskView, TaskWithColumn, UpdateTask};
use crate::repositories::ColumnRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, column_id, title, description, assigned_to, created_by, \
    priority, progress_percentage, due_date, \"order\", created_at, updated_at";

/// [`COLUMNS`] qualified with the `t` alias for joined queries.
pub(crate) const PREFIXED_COLUMNS: &str = "t.id, t.column_id, t.title, t.description, \
    t.assigned_to, t.created_by, t.priority, t.progress_percentage, t.due_date, \
    t.\"order\", t.created_at, t.updated_at";

/// Provides CRUD and reordering operations for tasks.
pub struct TaskRepo;

/// Outcome of [`TaskRepo::lock_with_columns`].
enum Locked {
    Task(Task),
    Missing,
    Moved,
}

impl TaskRepo {
    /// List all tasks, optionally filtered by exact priority and/or progress.
    ///
    /// Ordered by raw `order` with `id` as tie-break; the order values of
    /// different columns interleave.
    pub async fn list(
        pool: &PgPool,
        priority: Option<&str>,
        progress: Option<i32>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1::VARCHAR IS NULL OR priority = $1)
               AND ($2::INTEGER IS NULL OR progress_percentage = $2)
             ORDER BY \"order\", id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(priority)
            .bind(progress)
            .fetch_all(pool)
            .await
    }

    /// List the tasks of a column ordered by `order`.
    pub async fn list_for_column(pool: &PgPool, column_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE column_id = $1 ORDER BY \"order\"");
        sqlx::query_as::<_, Task>(&query)
            .bind(column_id)
            .fetch_all(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task with its derived deadline fields, column and board.
    pub async fn find_with_column(
        pool: &PgPool,
        id: DbId,
        today: Date,
    ) -> Result<Option<TaskWithColumn>, sqlx::Error> {
        let Some(task) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let mut attached = Self::attach_columns(pool, vec![task], today).await?;
        Ok(attached.pop())
    }

    /// [`TaskRepo::list`] with each task's column and board attached.
    pub async fn list_with_columns(
        pool: &PgPool,
        priority: Option<&str>,
        progress: Option<i32>,
        today: Date,
    ) -> Result<Vec<TaskWithColumn>, sqlx::Error> {
        let tasks = Self::list(pool, priority, progress).await?;
        Self::attach_columns(pool, tasks, today).await
    }

    async fn attach_columns(
        pool: &PgPool,
        tasks: Vec<Task>,
        today: Date,
    ) -> Result<Vec<TaskWithColumn>, sqlx::Error> {
        let mut column_ids: Vec<DbId> = tasks.iter().map(|t| t.column_id).collect();
        column_ids.sort_unstable();
        column_ids.dedup();

        let columns = ColumnRepo::find_many_with_board(pool, &column_ids).await?;

        Ok(tasks
            .into_iter()
            .filter_map(|task| {
                let column = columns.get(&task.column_id)?.clone();
                Some(TaskWithColumn {
                    task: TaskView::new(task, today),
                    column,
                })
            })
            .collect())
    }

    /// Append a task to the end of its column.
    ///
    /// The column row is locked while the next order is computed. Returns
    /// `None` if the column does not exist.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM columns WHERE id = $1 FOR UPDATE")
                .bind(input.column_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let (max_order,): (i32,) =
            sqlx::query_as("SELECT COALESCE(MAX(\"order\"), 0) FROM tasks WHERE column_id = $1")
                .bind(input.column_id)
                .fetch_one(&mut *tx)
                .await?;

        let query = format!(
            "INSERT INTO tasks (column_id, title, description, assigned_to, created_by,
                                priority, progress_percentage, due_date, \"order\")
             VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, $6),
                     COALESCE($7, $8), COALESCE($9, 0), $10, $11)
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(input.column_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.assigned_to)
            .bind(&input.created_by)
            .bind(DEFAULT_CREATED_BY)
            .bind(&input.priority)
            .bind(TaskPriority::default().as_str())
            .bind(input.progress_percentage)
            .bind(input.due_date)
            .bind(next_order(max_order))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(task))
    }

    /// Update a task. Only supplied fields in `input` are applied; an
    /// explicit `null` clears `description`, `assigned_to` or `due_date`.
    ///
    /// When `column_id` or `order` is supplied the task is first moved: it
    /// leaves its source sequence (later tasks shift down) and enters the
    /// destination at the requested position clamped to `1..=M+1`, later
    /// tasks shifting up. Without an `order`, a task changing column goes to
    /// the end of the destination. Returns `None` if the task does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        loop {
            let mut tx = pool.begin().await?;

            let current = if input.is_move() {
                match Self::lock_with_columns(&mut tx, id, input.column_id).await? {
                    Locked::Task(task) => task,
                    Locked::Missing => return Ok(None),
                    Locked::Moved => {
                        tx.rollback().await?;
                        continue;
                    }
                }
            } else {
                let lock = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 FOR UPDATE");
                let Some(task) = sqlx::query_as::<_, Task>(&lock)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
                else {
                    return Ok(None);
                };
                task
            };

            if input.is_move() {
                Self::move_in_tx(&mut tx, &current, input).await?;
            }

            let task = Self::apply_fields(&mut tx, id, input).await?;
            tx.commit().await?;
            return Ok(Some(task));
        }
    }

    /// Lock the task's column (and `target`, if any) in id order, then the
    /// task row.
    ///
    /// The column is read before any lock is held, so a concurrent move may
    /// have taken the task elsewhere by the time the locks are granted; that
    /// case is reported as [`Locked::Moved`] and the caller starts over.
    async fn lock_with_columns(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        target: Option<DbId>,
    ) -> Result<Locked, sqlx::Error> {
        let Some((column_id,)): Option<(DbId,)> =
            sqlx::query_as("SELECT column_id FROM tasks WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?
        else {
            return Ok(Locked::Missing);
        };

        let mut column_ids = vec![column_id, target.unwrap_or(column_id)];
        column_ids.sort_unstable();
        column_ids.dedup();
        sqlx::query("SELECT id FROM columns WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(&column_ids)
            .execute(&mut **tx)
            .await?;

        let lock = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 FOR UPDATE");
        let Some(task) = sqlx::query_as::<_, Task>(&lock)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(Locked::Missing);
        };

        if task.column_id != column_id {
            tracing::debug!(
                task_id = id,
                column_id,
                now_in = task.column_id,
                "Task moved before lock, retrying"
            );
            return Ok(Locked::Moved);
        }
        Ok(Locked::Task(task))
    }

    async fn apply_fields(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN COALESCE($4, '') ELSE description END,
                assigned_to = CASE WHEN $5 THEN $6 ELSE assigned_to END,
                created_by = COALESCE($7, created_by),
                priority = COALESCE($8, priority),
                progress_percentage = COALESCE($9, progress_percentage),
                due_date = CASE WHEN $10 THEN $11 ELSE due_date END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.assigned_to.is_some())
            .bind(input.assigned_to.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.created_by)
            .bind(&input.priority)
            .bind(input.progress_percentage)
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .fetch_one(&mut **tx)
            .await
    }

    async fn move_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        current: &Task,
        input: &UpdateTask,
    ) -> Result<(), sqlx::Error> {
        let target = input.column_id.unwrap_or(current.column_id);
        let same_column = target == current.column_id;

        sqlx::query(
            "UPDATE tasks SET \"order\" = \"order\" - 1
             WHERE column_id = $1 AND \"order\" > $2",
        )
        .bind(current.column_id)
        .bind(current.order)
        .execute(&mut **tx)
        .await?;

        let (siblings,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE column_id = $1 AND id <> $2")
                .bind(target)
                .bind(current.id)
                .fetch_one(&mut **tx)
                .await?;

        let requested = input.order.or(same_column.then_some(current.order));
        let position = insertion_position(requested, siblings);

        sqlx::query(
            "UPDATE tasks SET \"order\" = \"order\" + 1
             WHERE column_id = $1 AND \"order\" >= $2 AND id <> $3",
        )
        .bind(target)
        .bind(position)
        .bind(current.id)
        .execute(&mut **tx)
        .await?;

        sqlx::query("UPDATE tasks SET column_id = $2, \"order\" = $3 WHERE id = $1")
            .bind(current.id)
            .bind(target)
            .bind(position)
            .execute(&mut **tx)
            .await?;

        tracing::debug!(
            task_id = current.id,
            from_column = current.column_id,
            to_column = target,
            position,
            "Task moved"
        );
        Ok(())
    }

    /// Delete a task and close the gap in its column. Returns `true` if the task existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        loop {
            let mut tx = pool.begin().await?;

            let task = match Self::lock_with_columns(&mut tx, id, None).await? {
                Locked::Task(task) => task,
                Locked::Missing => return Ok(false),
                Locked::Moved => {
                    tx.rollback().await?;
                    continue;
                }
            };

            sqlx::query("DELETE FROM tasks WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                "UPDATE tasks SET \"order\" = \"order\" - 1
                 WHERE column_id = $1 AND \"order\" > $2",
            )
            .bind(task.column_id)
            .bind(task.order)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            return Ok(true);
        }
    }

    /// Delete every task of a column inside an existing transaction.
    pub(crate) async fn delete_for_column_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        column_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE column_id = $1")
            .bind(column_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every task of every column of a board inside an existing transaction.
    pub(crate) async fn delete_for_board_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        board_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM tasks WHERE column_id IN (SELECT id FROM columns WHERE board_id = $1)",
        )
        .bind(board_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }
}
