//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the table row and a `Deserialize` create DTO for inserts.

pub mod attendance;
pub mod site;
