//! Query parameter types for the listing endpoints.
//!
//! Every value arrives as an optional string; blank strings are treated as
//! absent so `?prioridad=` does not filter anything. Non-blank values are
//! passed through untrimmed.

use kanban_core::filter::BoardTaskFilter;
use serde::Deserialize;

use crate::error::AppError;

/// Filters for `GET /boards/{id}/tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct BoardTaskParams {
    pub prioridad: Option<String>,
    pub porcentaje: Option<String>,
    pub vencimiento: Option<String>,
    pub buscar: Option<String>,
}

impl BoardTaskParams {
    pub fn into_filter(self) -> Result<BoardTaskFilter, AppError> {
        Ok(BoardTaskFilter {
            priority: non_empty(self.prioridad),
            progress: parse_progress("porcentaje", self.porcentaje)?,
            due_date: non_empty(self.vencimiento),
            search: non_empty(self.buscar),
        })
    }
}

/// Filters for `GET /tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    pub priority: Option<String>,
    pub progress: Option<String>,
}

impl TaskListParams {
    /// Normalised `(priority, progress)` pair.
    pub fn into_parts(self) -> Result<(Option<String>, Option<i32>), AppError> {
        Ok((
            non_empty(self.priority),
            parse_progress("progress", self.progress)?,
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_progress(field: &'static str, value: Option<String>) -> Result<Option<i32>, AppError> {
    non_empty(value)
        .map(|v| {
            v.trim()
                .parse::<i32>()
                .map_err(|_| AppError::invalid_field(field, "The progress filter must be an integer."))
        })
        .transpose()
}
