//! Domain building blocks shared by the datastore and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod fields;
pub mod links;
pub mod resource;
pub mod types;
