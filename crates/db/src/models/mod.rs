//! Entity structs and per-verb input schemas.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Create*` schema for POST (required vs optional fields)
//! - A `Replace*` schema for PUT (every updatable field required)
//! - An `Update*` schema for PATCH (all fields optional)
//!
//! Input schemas reject unknown fields at deserialization time and are
//! checked with `validator` before any query is issued.

pub mod author;
pub mod character;
pub mod novel;
