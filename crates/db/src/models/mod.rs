//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO for patches
//! - Serialized compositions (entity plus attached children/parents)

pub mod board;
pub mod column;
pub mod task;
