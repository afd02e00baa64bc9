//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One query per collection, ordering done in SQL
//! - Deterministic ordering: display field, then id

pub mod reference;

pub use reference::{DbError, PgReferenceStore};
