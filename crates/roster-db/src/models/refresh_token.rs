//! Refresh token database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for refresh_tokens table
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenModel {
    pub token: String,
    pub member_id: i64,
    pub member_email: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
