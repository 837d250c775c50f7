//! Refresh token entity - opaque, single-use credential for renewing access tokens

use chrono::{DateTime, Utc};

use crate::value_objects::MemberId;

/// A stored refresh token. Never mutated; consumed (deleted) on use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub member_id: MemberId,
    pub member_email: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub token: String,
    pub member_id: MemberId,
    pub member_email: String,
    pub expires_at: DateTime<Utc>,
}
