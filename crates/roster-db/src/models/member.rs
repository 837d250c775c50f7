//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub year: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub personal_website: Option<String>,
    pub stack_overflow: Option<String>,
    pub portfolium: Option<String>,
    pub handshake: Option<String>,
    pub slack: Option<String>,
    pub discord: Option<String>,
    pub thumbnail: Option<Vec<u8>>,
    pub active: bool,
    pub banned: bool,
    pub privilege: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column list shared by every query returning a full member row
pub(crate) const MEMBER_COLUMNS: &str = "id, student_id, first_name, last_name, email, password_hash, \
     year, github, linkedin, personal_website, stack_overflow, portfolium, handshake, slack, discord, \
     thumbnail, active, banned, privilege, created_at, updated_at";
