pub mod board;
pub mod column;
pub mod task;

use kanban_core::types::Date;

/// Calendar day the deadline fields are derived against.
pub(crate) fn today() -> Date {
    chrono::Utc::now().date_naive()
}
