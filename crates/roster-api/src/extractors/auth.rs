//! Authentication extractors
//!
//! Resolve the bearer token in the Authorization header to a member and
//! enforce the route's access rule. These run on request parts, so a caller
//! without access is turned away before the body is read.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use roster_core::entities::Member;
use roster_core::{DomainError, MemberId};
use roster_service::{AuthService, ServiceError};

use super::path::MemberPath;
use crate::response::ApiError;
use crate::state::AppState;

/// Any authenticated member
#[derive(Debug, Clone)]
pub struct AuthMember(pub Member);

#[async_trait]
impl<S> FromRequestParts<S> for AuthMember
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let member = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::from(e)
            })?;

        Ok(AuthMember(member))
    }
}

/// An authenticated admin
#[derive(Debug, Clone)]
pub struct AdminMember(pub Member);

#[async_trait]
impl<S> FromRequestParts<S> for AdminMember
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthMember(member) = AuthMember::from_request_parts(parts, state).await?;

        if !member.is_admin() {
            tracing::warn!(member_id = %member.id, "Admin route denied");
            return Err(ServiceError::from(DomainError::AdminRequired).into());
        }

        Ok(AdminMember(member))
    }
}

/// The member named by `:member_id`, accessed by that member or an admin
#[derive(Debug, Clone)]
pub struct SelfOrAdmin {
    pub actor: Member,
    pub target: MemberId,
}

#[async_trait]
impl<S> FromRequestParts<S> for SelfOrAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthMember(actor) = AuthMember::from_request_parts(parts, state).await?;
        let MemberPath(target) = MemberPath::from_request_parts(parts, state).await?;

        if !actor.can_manage(target) {
            tracing::warn!(actor_id = %actor.id, target_id = %target, "Cross-member access denied");
            return Err(ServiceError::from(DomainError::NotSelfOrAdmin).into());
        }

        Ok(SelfOrAdmin { actor, target })
    }
}
