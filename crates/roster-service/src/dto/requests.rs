//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Required text fields default to empty so that a missing field is reported
//! as a validation error rather than a body parse failure.

use roster_core::Privilege;
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Member registration request (also used by admins creating members)
///
/// `privilege`, `active` and `banned` are not accepted here; unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 15, message = "\"studentId\" is required and at most 15 characters"))]
    pub student_id: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "\"firstName\" is required and at most 255 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "\"lastName\" is required and at most 255 characters"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(
        email(message = "\"email\" must be a valid email"),
        length(max = 255, message = "\"email\" must be at most 255 characters")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, max = 128, message = "\"password\" must be 6-128 characters"))]
    pub password: String,

    #[validate(length(max = 30, message = "\"year\" must be at most 30 characters"))]
    pub year: Option<String>,

    #[validate(url(message = "\"github\" must be a valid URL"))]
    pub github: Option<String>,

    #[validate(url(message = "\"linkedin\" must be a valid URL"))]
    pub linkedin: Option<String>,

    #[validate(url(message = "\"personalWebsite\" must be a valid URL"))]
    pub personal_website: Option<String>,

    #[validate(url(message = "\"stackOverflow\" must be a valid URL"))]
    pub stack_overflow: Option<String>,

    #[validate(url(message = "\"portfolium\" must be a valid URL"))]
    pub portfolium: Option<String>,

    #[validate(url(message = "\"handshake\" must be a valid URL"))]
    pub handshake: Option<String>,

    #[validate(length(max = 50, message = "\"slack\" must be at most 50 characters"))]
    pub slack: Option<String>,

    #[validate(length(max = 50, message = "\"discord\" must be at most 50 characters"))]
    pub discord: Option<String>,

    /// Standard base64
    pub thumbnail: Option<String>,
}

/// Member login request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "\"email\" is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "\"password\" is required and at most 128 characters"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "\"email\" is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "\"refreshToken\" is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Full replacement of a member record (PUT)
///
/// Optional profile fields left out are cleared.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceMemberRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: SignupRequest,

    /// Admin only
    pub privilege: Option<Privilege>,
    /// Admin only
    pub active: Option<bool>,
    /// Admin only
    pub banned: Option<bool>,
}

/// Partial update of a member record (PATCH)
///
/// Absent fields are left unchanged; `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 15, message = "\"studentId\" must be 1-15 characters"))]
    pub student_id: Option<String>,

    #[validate(length(min = 1, max = 255, message = "\"firstName\" must be 1-255 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "\"lastName\" must be 1-255 characters"))]
    pub last_name: Option<String>,

    #[validate(
        email(message = "\"email\" must be a valid email"),
        length(max = 255, message = "\"email\" must be at most 255 characters")
    )]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 128, message = "\"password\" must be 6-128 characters"))]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 30, message = "\"year\" must be at most 30 characters"))]
    pub year: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "\"github\" must be a valid URL"))]
    pub github: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "\"linkedin\" must be a valid URL"))]
    pub linkedin: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "\"personalWebsite\" must be a valid URL"))]
    pub personal_website: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "\"stackOverflow\" must be a valid URL"))]
    pub stack_overflow: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "\"portfolium\" must be a valid URL"))]
    pub portfolium: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "\"handshake\" must be a valid URL"))]
    pub handshake: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 50, message = "\"slack\" must be at most 50 characters"))]
    pub slack: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 50, message = "\"discord\" must be at most 50 characters"))]
    pub discord: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub thumbnail: Option<Option<String>>,

    /// Admin only
    pub privilege: Option<Privilege>,
    /// Admin only
    pub active: Option<bool>,
    /// Admin only
    pub banned: Option<bool>,
}

/// Name of the first admin-only field present in a request, if any
pub(crate) fn first_privileged_field(
    privilege: Option<Privilege>,
    active: Option<bool>,
    banned: Option<bool>,
) -> Option<&'static str> {
    if privilege.is_some() {
        Some("privilege")
    } else if active.is_some() {
        Some("active")
    } else if banned.is_some() {
        Some("banned")
    } else {
        None
    }
}

impl ReplaceMemberRequest {
    pub fn privileged_field(&self) -> Option<&'static str> {
        first_privileged_field(self.privilege, self.active, self.banned)
    }
}

impl UpdateMemberRequest {
    pub fn privileged_field(&self) -> Option<&'static str> {
        first_privileged_field(self.privilege, self.active, self.banned)
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for `GET /members`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersQuery {
    #[validate(range(min = 1, max = 1_000_000, message = "\"page\" must be between 1 and 1000000"))]
    pub page: Option<i64>,

    /// Clamped to 1..=100
    pub per_page: Option<i64>,

    pub name: Option<String>,

    pub email: Option<String>,

    /// `member` or `admin`
    pub role: Option<String>,
}

/// Query parameters for `GET /members/lookup`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LookupQuery {
    #[serde(default)]
    #[validate(email(message = "\"email\" must be a valid email"))]
    pub email: String,
}
