//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::MemberId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not allowed to access another member's record")]
    NotSelfOrAdmin,

    #[error("Admin privilege required")]
    AdminRequired,

    #[error("Only an admin may change {0}")]
    PrivilegedField(&'static str),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Student ID already in use")]
    StudentIdAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",

            Self::NotSelfOrAdmin | Self::AdminRequired | Self::PrivilegedField(_) => "FORBIDDEN",

            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",

            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::StudentIdAlreadyExists => "STUDENT_ID_ALREADY_EXISTS",

            Self::DatabaseError(_) => "INTERNAL_ERROR",
        }
    }

    /// Body field a conflict refers to, if any
    pub fn conflicting_field(&self) -> Option<&'static str> {
        match self {
            Self::EmailAlreadyExists => Some("email"),
            Self::StudentIdAlreadyExists => Some("studentId"),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotSelfOrAdmin | Self::AdminRequired | Self::PrivilegedField(_)
        )
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidRefreshToken)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::StudentIdAlreadyExists)
    }
}
