//! # signalhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `LightStore` port defined in `signalhub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows, degrading damaged rows
//!   instead of failing the whole load
//!
//! ## Dependency rule
//! Depends on `signalhub-app` (for port traits) and `signalhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod light_store;
pub mod pool;

pub use light_store::SqliteLightStore;
