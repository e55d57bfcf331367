use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kanban_core::error::CoreError;
use kanban_core::validation::field_error;
use serde_json::{json, Value};
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `kanban_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Field-level validation failures on a request body.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A store failure while creating an entity, reported with its detail.
    #[error("{message}: {source}")]
    CreationFailed {
        message: &'static str,
        source: sqlx::Error,
    },

    /// Any other error rendered inside the `{ "status": "error", ... }` envelope.
    #[error(transparent)]
    Enveloped(Box<AppError>),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap `err` so its body carries `"status": "error"`.
    pub fn enveloped(err: impl Into<AppError>) -> Self {
        AppError::Enveloped(Box::new(err.into()))
    }

    /// A 422 naming a single offending field, for checks that need the database.
    pub fn invalid_field(field: &'static str, message: &'static str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, field_error("invalid", message));
        AppError::Validation(errors)
    }

    fn status_and_body(&self) -> (StatusCode, Value) {
        match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "message": "The given data was invalid.",
                    "code": "VALIDATION_ERROR",
                    "errors": field_messages(errors),
                }),
            ),
            AppError::CreationFailed { message, source } => {
                tracing::error!(error = %source, "{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "status": "error",
                        "message": message,
                        "error": source.to_string(),
                        "code": "CREATION_FAILED",
                    }),
                )
            }
            AppError::Enveloped(inner) => {
                let (status, mut body) = inner.status_and_body();
                if let Value::Object(map) = &mut body {
                    map.insert("status".into(), Value::from("error"));
                }
                (status, body)
            }
            other => {
                let (status, code, message) = other.classify();
                (status, json!({ "message": message, "code": code }))
            }
        }
    }

    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                ),
                CoreError::Validation(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    msg.clone(),
                ),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // Rendered by `status_and_body`.
            AppError::Validation(_) | AppError::CreationFailed { .. } | AppError::Enveloped(_) => {
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Flatten validator output into `{ field: [message, ...] }`.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("The {field} field is invalid."),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
