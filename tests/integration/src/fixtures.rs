//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Identifiers are derived
//! from UUIDs so reruns against the same database never collide.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Short unique suffix that fits inside a student id
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Signup request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            student_id: format!("s{suffix}"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: format!("member-{suffix}@example.com"),
            password: "hunter22".to_string(),
            github: None,
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Refresh token request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub email: String,
    pub refresh_token: String,
}

/// Token pair
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Signup and login response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenResponse,
    pub member: MemberResponse,
}

/// Public member view
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub github: Option<String>,
    pub privilege: String,
    pub active: bool,
    pub banned: bool,
}

/// Page of members
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPage {
    pub data: Vec<MemberResponse>,
    pub page: i64,
    pub per_page: i64,
}
