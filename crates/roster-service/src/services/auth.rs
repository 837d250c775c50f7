//! Authentication service
//!
//! Handles member registration, login, token refresh, and bearer token
//! authentication.

use chrono::Utc;
use roster_common::auth::generate_refresh_token;
use roster_common::AppError;
use roster_core::entities::{Member, MemberProfile, NewMember, NewRefreshToken};
use roster_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, MemberResponse, RefreshTokenRequest, SignupRequest, TokenResponse};
use crate::validation::{validate_login, validate_refresh, validate_signup};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Hash a password on the blocking pool
pub(crate) async fn hash_blocking(ctx: &ServiceContext, password: String) -> ServiceResult<String> {
    let passwords = ctx.password_service();
    tokio::task::spawn_blocking(move || passwords.hash(&password))
        .await
        .map_err(|e| ServiceError::internal(format!("password hashing task failed: {e}")))?
        .map_err(ServiceError::from)
}

/// Verify a password on the blocking pool; `None` burns a dummy verification
async fn verify_blocking(
    ctx: &ServiceContext,
    password: String,
    hash: Option<String>,
) -> ServiceResult<bool> {
    let passwords = ctx.password_service();
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => passwords.verify(&password, &hash),
        None => {
            passwords.verify_dummy(&password);
            Ok(false)
        }
    })
    .await
    .map_err(|e| ServiceError::internal(format!("password verification task failed: {e}")))?
    .map_err(ServiceError::from)
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new member
    ///
    /// The new member is always a regular, inactive, unbanned member.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        validate_signup(&request)?;

        let (profile, password) = request
            .into_profile()
            .map_err(|e| ServiceError::validation(format!("thumbnail: {e}")))?;
        let password_hash = hash_blocking(self.ctx, password).await?;

        let member = self
            .ctx
            .member_repo()
            .create(&NewMember::regular(profile, password_hash))
            .await?;

        info!(member_id = %member.id, "Member registered successfully");

        let tokens = self.issue_tokens(&member).await?;
        Ok(AuthResponse {
            tokens,
            member: MemberResponse::from(&member),
        })
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        validate_login(&request)?;

        let email = MemberProfile::normalize_email(&request.email);
        let member = self.ctx.member_repo().find_by_email(&email).await?;
        let hash = member.as_ref().map(|m| m.password_hash.clone());
        let is_valid = verify_blocking(self.ctx, request.password, hash).await?;

        let member = match member {
            Some(member) if is_valid => member,
            Some(member) => {
                warn!(member_id = %member.id, "Login failed: invalid password");
                return Err(AppError::InvalidCredentials.into());
            }
            None => {
                warn!("Login failed: member not found");
                return Err(AppError::InvalidCredentials.into());
            }
        };

        info!(member_id = %member.id, "Member logged in successfully");

        let tokens = self.issue_tokens(&member).await?;
        Ok(AuthResponse {
            tokens,
            member: MemberResponse::from(&member),
        })
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented token is deleted whether or not the exchange succeeds.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<TokenResponse> {
        validate_refresh(&request)?;

        let email = MemberProfile::normalize_email(&request.email);
        let stored = self
            .ctx
            .refresh_token_repo()
            .consume(&request.refresh_token, &email)
            .await?
            .ok_or_else(|| {
                warn!("Refresh failed: unknown token or email mismatch");
                ServiceError::from(DomainError::InvalidRefreshToken)
            })?;

        if stored.is_expired(Utc::now()) {
            warn!(member_id = %stored.member_id, "Refresh failed: token expired");
            return Err(DomainError::InvalidRefreshToken.into());
        }

        let member = self
            .ctx
            .member_repo()
            .find_by_id(stored.member_id)
            .await?
            .ok_or_else(|| {
                warn!(member_id = %stored.member_id, "Refresh failed: member gone");
                ServiceError::from(DomainError::InvalidRefreshToken)
            })?;

        info!(member_id = %member.id, "Tokens refreshed");
        self.issue_tokens(&member).await
    }

    /// Resolve a bearer access token to the member it was issued for
    #[instrument(skip(self, access_token))]
    pub async fn authenticate(&self, access_token: &str) -> ServiceResult<Member> {
        let member_id = self.ctx.jwt_service().validate_access_token(access_token)?;

        self.ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| {
                warn!(member_id = %member_id, "Token subject no longer exists");
                ServiceError::App(AppError::InvalidToken)
            })
    }

    /// Sign an access token and persist a fresh refresh token
    async fn issue_tokens(&self, member: &Member) -> ServiceResult<TokenResponse> {
        let access = self.ctx.jwt_service().issue_access_token(member.id)?;

        let refresh = generate_refresh_token(member.id);
        self.ctx
            .refresh_token_repo()
            .create(&NewRefreshToken {
                token: refresh.clone(),
                member_id: member.id,
                member_email: member.email().to_string(),
                expires_at: Utc::now() + self.ctx.refresh_token_ttl(),
            })
            .await?;

        Ok(TokenResponse::bearer(access.token, refresh, access.expires_in))
    }
}
