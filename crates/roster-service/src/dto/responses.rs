//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase keys.
//! Member ids are plain JSON numbers.

use chrono::{DateTime, Utc};
use roster_core::Privilege;
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page of results with offset-based pagination
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub per_page: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, per_page: i64) -> Self {
        Self {
            data,
            page,
            per_page,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Token pair returned by login, signup and refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token_type: &'static str,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            token_type: "Bearer",
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

/// Authentication response with tokens and the member they belong to
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenResponse,
    pub member: MemberResponse,
}

// ============================================================================
// Member Responses
// ============================================================================

/// Public view of a member.
///
/// There is no password field; this is the only shape a member leaves the
/// service layer in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
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
    /// Standard base64
    pub thumbnail: Option<String>,
    pub privilege: Privilege,
    pub active: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
