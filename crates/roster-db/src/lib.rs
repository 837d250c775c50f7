//! # roster-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `roster-core`. It handles:
//!
//! - Connection pool management and checkout tracking
//! - Schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_db::{apply_schema, create_pool, Database, PgMemberRepository};
//!
//! async fn example(config: &roster_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     let db = Database::new(pool, config.leak_threshold());
//!     apply_schema(&db).await?;
//!     let members = PgMemberRepository::new(db);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_pool, Database, HeldConnection, PgPool};
pub use repositories::{PgMemberRepository, PgRefreshTokenRepository};
pub use schema::{apply_schema, SchemaError};
