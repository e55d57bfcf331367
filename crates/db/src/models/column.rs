//! Column entity model and DTOs.

use kanban_core::column::ColumnKind;
use kanban_core::types::{DbId, Timestamp};
use kanban_core::validation::validate_hex_color;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::board::Board;
use crate::models::task::TaskView;

/// A column row from the `columns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Column {
    pub id: DbId,
    pub board_id: DbId,
    pub name: String,
    pub color: String,
    pub order: i32,
    /// Seeded with the board; protected from rename/delete when enabled.
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        ColumnKind::from_is_default(self.is_default)
    }
}

/// DTO for creating a column under a board (board id comes from the path).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateColumn {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "The name field is required and may not exceed 255 characters."))]
    pub name: String,
    /// Defaults to `#cccccc`.
    #[validate(length(max = 20), custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    /// Insert position; omitted appends after the last column.
    pub order: Option<i32>,
}

/// DTO for updating a column. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateColumn {
    #[validate(length(min = 1, max = 255, message = "The name field may not be empty or exceed 255 characters."))]
    pub name: Option<String>,
    #[validate(length(max = 20), custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}

/// A column with its tasks in column order.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnWithTasks {
    #[serde(flatten)]
    pub column: Column,
    pub tasks: Vec<TaskView>,
}

/// A column with its owning board, attached to tasks in listings.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnWithBoard {
    #[serde(flatten)]
    pub column: Column,
    pub board: Board,
}
