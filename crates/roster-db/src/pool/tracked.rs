//! Connection checkout with hold-time tracking
//!
//! Every repository call goes through [`Database::acquire`]. The returned guard
//! hands the connection back to the pool when dropped, on every exit path, and
//! warns when it was kept longer than the configured threshold.

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnection, PgPool};
use sqlx::Postgres;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Pool handle shared by all repositories
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    leak_threshold: Duration,
}

impl Database {
    pub fn new(pool: PgPool, leak_threshold: Duration) -> Self {
        Self {
            pool,
            leak_threshold,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn leak_threshold(&self) -> Duration {
        self.leak_threshold
    }

    /// Check out a connection for `operation`.
    ///
    /// Fails with `sqlx::Error::PoolTimedOut` when none frees up within the
    /// pool's acquire timeout.
    pub async fn acquire(&self, operation: &'static str) -> Result<HeldConnection, sqlx::Error> {
        let conn = self.pool.acquire().await?;
        debug!(operation, idle = self.pool.num_idle(), "Connection checked out");

        Ok(HeldConnection {
            conn,
            operation,
            acquired_at: Instant::now(),
            leak_threshold: self.leak_threshold,
        })
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("size", &self.pool.size())
            .field("leak_threshold", &self.leak_threshold)
            .finish_non_exhaustive()
    }
}

/// A checked-out connection that reports itself if held too long
pub struct HeldConnection {
    conn: PoolConnection<Postgres>,
    operation: &'static str,
    acquired_at: Instant,
    leak_threshold: Duration,
}

impl HeldConnection {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn held_for(&self) -> Duration {
        self.acquired_at.elapsed()
    }
}

impl Deref for HeldConnection {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        &self.conn
    }
}

impl DerefMut for HeldConnection {
    fn deref_mut(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

impl Drop for HeldConnection {
    fn drop(&mut self) {
        let held = self.held_for();
        if held > self.leak_threshold {
            warn!(
                operation = self.operation,
                held_ms = held.as_millis() as u64,
                threshold_ms = self.leak_threshold.as_millis() as u64,
                "Database connection held longer than threshold"
            );
        }
    }
}
