//! Kanban domain logic.
//!
//! Everything in this crate is pure: ordering arithmetic, the default column
//! set seeded on every board, protected-column rules, task priority and
//! deadline derivation, board task filtering and the field validators used by
//! request DTOs. Persistence lives in `kanban-db`, HTTP in `kanban-api`.

pub mod board;
pub mod column;
pub mod error;
pub mod filter;
pub mod ordering;
pub mod task;
pub mod types;
pub mod validation;
