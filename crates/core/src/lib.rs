//! Domain logic shared by the db and api crates.
//!
//! Everything here is pure: shared types and the field-rules validation
//! engine. No I/O, no web or database types.

pub mod types;
pub mod validation;
