//! Path parameter extractors
//!
//! Type-safe extraction of member ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use roster_core::MemberId;

use crate::response::ApiError;

/// Raw `:member_id` path segment
#[derive(Debug, serde::Deserialize)]
pub struct MemberIdPath {
    pub member_id: String,
}

impl MemberIdPath {
    /// Parse member_id as a positive integer id
    pub fn member_id(&self) -> Result<MemberId, ApiError> {
        MemberId::parse(&self.member_id)
            .map_err(|_| ApiError::invalid_path("\"member_id\" must be a positive integer"))
    }
}

/// Parsed `:member_id` path segment
#[derive(Debug, Clone, Copy)]
pub struct MemberPath(pub MemberId);

#[async_trait]
impl<S> FromRequestParts<S> for MemberPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<MemberIdPath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(MemberPath(raw.member_id()?))
    }
}
