//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every method that reads and
//! then rewrites `order` values runs in one transaction holding a row lock on
//! the parent (board for columns, column for tasks).

pub mod board_repo;
pub mod column_repo;
pub mod task_repo;

pub use board_repo::BoardRepo;
pub use column_repo::ColumnRepo;
pub use task_repo::TaskRepo;
