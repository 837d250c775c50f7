//! Database connection pool management

mod postgres;
mod tracked;

pub use postgres::create_pool;
pub use tracked::{Database, HeldConnection};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
