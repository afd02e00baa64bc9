//! Database layer - connection pool, schema, seed data, repositories
//!
//! # Design Principles
//!
//! - Connection pool (default max 6 connections) shared by every handler
//! - Reference reads are single queries; cohorts JOIN their program
//! - Seed relies on unique constraints (ON CONFLICT), no check-then-insert

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use sqlx::PgPool;
