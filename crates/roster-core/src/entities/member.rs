//! Member entity - a single person on the club roster

use chrono::{DateTime, Utc};

use crate::value_objects::{MemberId, Privilege};

/// Profile fields a member (or an admin on their behalf) may edit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberProfile {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Always stored lowercased and trimmed
    pub email: String,
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
}

impl MemberProfile {
    /// Canonical form of an email address used for storage and lookups
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

/// A persisted roster member.
///
/// Carries the password hash, so it must never be serialized directly;
/// the service layer converts it into a public view first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub profile: MemberProfile,
    pub password_hash: String,
    pub privilege: Privilege,
    pub active: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.privilege.is_admin()
    }

    /// Whether this member may read or modify the record of `target`
    #[inline]
    pub fn can_manage(&self, target: MemberId) -> bool {
        self.id == target || self.is_admin()
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }
}

/// Data required to insert a new member row
#[derive(Debug, Clone)]
pub struct NewMember {
    pub profile: MemberProfile,
    pub password_hash: String,
    pub privilege: Privilege,
    pub active: bool,
    pub banned: bool,
}

impl NewMember {
    /// A regular, inactive, unbanned member
    pub fn regular(profile: MemberProfile, password_hash: String) -> Self {
        Self {
            profile,
            password_hash,
            privilege: Privilege::Member,
            active: false,
            banned: false,
        }
    }
}
