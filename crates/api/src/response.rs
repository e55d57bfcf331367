//! Shared response envelope types for API handlers.
//!
//! Board and column mutations answer with a `{ status, message, data }`
//! envelope; deletes answer with a bare `{ message }`.

use serde::Serialize;

/// `{ "status": "success", "message": ..., "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct StatusResponse<T: Serialize> {
    pub status: &'static str,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> StatusResponse<T> {
    pub fn success(message: &'static str, data: T) -> Self {
        Self {
            status: "success",
            message,
            data,
        }
    }
}

/// `{ "message": ... }` body for confirmations such as deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
