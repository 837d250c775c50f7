//! Service context - dependency container for services
//!
//! Holds the repositories and auth helpers needed by services.

use std::sync::Arc;

use chrono::Duration;
use roster_common::auth::{JwtService, PasswordService};
use roster_core::traits::{MemberRepository, RefreshTokenRepository};

use super::error::{ServiceError, ServiceResult};

/// Default refresh token lifetime
const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 30;

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,

    // Auth
    jwt_service: Arc<JwtService>,
    password_service: Arc<PasswordService>,
    refresh_token_ttl: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        jwt_service: Arc<JwtService>,
        password_service: Arc<PasswordService>,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            member_repo,
            refresh_token_repo,
            jwt_service,
            password_service,
            refresh_token_ttl,
        }
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the refresh token repository
    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    // === Auth ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Shared handle to the password service, for use on the blocking pool
    pub fn password_service(&self) -> Arc<PasswordService> {
        Arc::clone(&self.password_service)
    }

    /// How long a refresh token stays valid
    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("password_service", &self.password_service)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<Arc<PasswordService>>,
    refresh_token_ttl: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            member_repo: None,
            refresh_token_repo: None,
            jwt_service: None,
            password_service: None,
            refresh_token_ttl: Duration::days(DEFAULT_REFRESH_TOKEN_DAYS),
        }
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.refresh_token_ttl <= Duration::zero() {
            return Err(ServiceError::validation("refresh_token_ttl must be positive"));
        }

        Ok(ServiceContext::new(
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.refresh_token_repo
                .ok_or_else(|| ServiceError::validation("refresh_token_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.password_service
                .ok_or_else(|| ServiceError::validation("password_service is required"))?,
            self.refresh_token_ttl,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
