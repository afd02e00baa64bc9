//! formactl-server: HTTP server for training reference data
//!
//! Serves the six reference collections of the training management
//! backend (roles, document types, student states, cohorts, genders,
//! training programs) as one cached snapshot, plus per-collection
//! listings, over a PostgreSQL store.

pub mod db;
pub mod http;
pub mod models;
pub mod reference;

pub use db::{create_pool, DbError, PgReferenceStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::ReferenceSnapshot;
pub use reference::{fetch_snapshot, ReferenceCache, ReferenceStore};
