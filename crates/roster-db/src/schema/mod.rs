//! Schema bootstrap
//!
//! The SQL files under `migrations/` are embedded at compile time and applied
//! by sqlx's migrator, which records them in `_sqlx_migrations` and holds a
//! Postgres advisory lock so instances starting together migrate one at a time.

use sqlx::migrate::{MigrateError, Migrator};
use tracing::{info, instrument};

use crate::pool::Database;

pub type SchemaError = MigrateError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create or upgrade the tables this service needs
#[instrument(skip(db))]
pub async fn apply_schema(db: &Database) -> Result<(), SchemaError> {
    info!(
        migrations = MIGRATOR.iter().count(),
        "Running database migrations"
    );
    MIGRATOR.run(db.pool()).await?;
    Ok(())
}
