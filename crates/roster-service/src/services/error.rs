//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use roster_common::AppError;
use roster_core::DomainError;
use std::fmt;

use crate::validation::FieldError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, config, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// One or more invalid input fields
    Invalid {
        location: &'static str,
        errors: Vec<FieldError>,
    },

    /// Validation error without field detail
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Invalid { location, .. } => write!(f, "Invalid request {location}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a field-level validation error
    pub fn invalid(location: &'static str, errors: Vec<FieldError>) -> Self {
        Self::Invalid { location, errors }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => AppError::status_for_domain(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Invalid { .. } | Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Invalid { .. } | Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this maps to a 5xx response
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Field-level detail for the error body, if any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Invalid { errors, .. } => serde_json::to_value(errors).ok(),
            Self::Domain(e) | Self::App(AppError::Domain(e)) => e.conflicting_field().and_then(|field| {
                serde_json::to_value([FieldError {
                    field: field.to_string(),
                    location: crate::validation::BODY,
                    messages: vec![format!("\"{field}\" already exists")],
                }])
                .ok()
            }),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::Domain(e),
            other => Self::App(other),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Invalid { errors, .. } => AppError::Validation(
                errors
                    .iter()
                    .flat_map(|e| e.messages.iter().cloned())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
