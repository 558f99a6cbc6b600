//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - The aggregated display shapes assembled by the service layer

pub mod answer;
pub mod comment;
pub mod question;
pub mod tag;
pub mod user;
