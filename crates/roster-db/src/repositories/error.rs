//! Error handling utilities for repositories

use roster_core::error::DomainError;
use roster_core::value_objects::MemberId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback.
///
/// `on_unique` receives the name of the violated constraint, if reported.
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Classify a unique violation on the members table by constraint name
pub fn member_conflict(constraint: Option<&str>) -> DomainError {
    match constraint {
        Some("members_student_id_key") => DomainError::StudentIdAlreadyExists,
        _ => DomainError::EmailAlreadyExists,
    }
}

/// Create a "member not found" error
pub fn member_not_found(id: MemberId) -> DomainError {
    DomainError::MemberNotFound(id)
}
