//! Reference data: store seam, snapshot fetch, snapshot cache
//!
//! - `ReferenceStore` trait with Postgres and in-memory implementations
//! - `fetch_snapshot` reads all six collections concurrently, all-or-nothing
//! - `ReferenceCache` serves snapshots for a TTL window, one refresh at a time

pub mod aggregator;
pub mod cache;
pub mod store;

pub use aggregator::{fetch_snapshot, Collection, RefreshError};
pub use cache::{CacheLookup, ReferenceCache, DEFAULT_TTL};
pub use store::{MemoryReferenceStore, ReferenceStore};
