//! Task entity model and DTOs.

use kanban_core::filter::TaskFields;
use kanban_core::task::{days_until_due, DeadlineStatus};
use kanban_core::types::{Date, DbId, Timestamp};
use kanban_core::validation::validate_priority;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::column::ColumnWithBoard;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub column_id: DbId,
    pub title: String,
    pub description: String,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
    /// One of `low`, `medium`, `high`.
    pub priority: String,
    pub progress_percentage: i32,
    pub due_date: Option<Date>,
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TaskFields for Task {
    fn priority(&self) -> &str {
        &self.priority
    }

    fn progress_percentage(&self) -> i32 {
        self.progress_percentage
    }

    fn due_date(&self) -> Option<Date> {
        self.due_date
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// DTO for creating a task. `order` is always assigned by the repository.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[serde(default)]
    #[validate(range(min = 1, message = "The column_id field is required."))]
    pub column_id: DbId,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "The title field is required and may not exceed 255 characters."))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub assigned_to: Option<String>,
    /// Defaults to `Usuario`.
    #[validate(length(max = 100))]
    pub created_by: Option<String>,
    /// Defaults to `medium`.
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
    /// Defaults to 0.
    #[validate(range(min = 0, max = 100))]
    pub progress_percentage: Option<i32>,
    pub due_date: Option<Date>,
}

/// DTO for updating a task. All fields are optional.
///
/// Changing `column_id` and/or `order` moves the task; both affected
/// columns are renumbered. `description`, `assigned_to` and `due_date` are
/// `Option<Option<T>>`: absent keeps the stored value, an explicit `null`
/// clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255, message = "The title field may not be empty or exceed 255 characters."))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 100))]
    pub assigned_to: Option<Option<String>>,
    #[validate(length(max = 100))]
    pub created_by: Option<String>,
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub progress_percentage: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<Date>>,
    pub column_id: Option<DbId>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

impl UpdateTask {
    /// Whether this update repositions the task.
    pub fn is_move(&self) -> bool {
        self.column_id.is_some() || self.order.is_some()
    }
}

/// Marks a field that appeared in the body, `null` included.
///
/// Only called when the key is present; `#[serde(default)]` covers absence.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}


/// A task with its deadline fields derived against a given day.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub deadline_status: DeadlineStatus,
    pub days_until_due: Option<i64>,
}

impl TaskView {
    pub fn new(task: Task, today: Date) -> Self {
        let deadline_status = DeadlineStatus::evaluate(task.due_date, today);
        let days_until_due = days_until_due(task.due_date, today);
        Self {
            task,
            deadline_status,
            days_until_due,
        }
    }
}

/// A task with its column and the column's board attached.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithColumn {
    #[serde(flatten)]
    pub task: TaskView,
    pub column: ColumnWithBoard,
}
