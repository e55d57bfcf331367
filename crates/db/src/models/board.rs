//! Board entity model and DTOs.

use kanban_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::column::{Column, ColumnWithTasks};

/// A board row from the `boards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new board. The default columns are seeded alongside.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBoard {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "The name field is required and may not exceed 255 characters."))]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a board. `name` is required on every update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBoard {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "The name field is required and may not exceed 255 characters."))]
    pub name: String,
    pub description: Option<String>,
}

/// A freshly created board with its seeded columns.
#[derive(Debug, Clone, Serialize)]
pub struct BoardWithColumns {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<Column>,
}

/// A board with every column and each column's tasks.
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<ColumnWithTasks>,
}
