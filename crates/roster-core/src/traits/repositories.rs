//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Member, NewMember, NewRefreshToken, RefreshToken};
use crate::error::DomainError;
use crate::value_objects::{MemberId, Privilege};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

/// Filters and paging for listing members.
///
/// Filters are conjunctive; `None` or empty strings are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub privilege: Option<Privilege>,
    pub page: i64,
    pub per_page: i64,
}

impl MemberQuery {
    pub const DEFAULT_PER_PAGE: i64 = 30;
    pub const MAX_PER_PAGE: i64 = 100;
    pub const MAX_PAGE: i64 = 1_000_000;

    /// Build a query with page and page size clamped to valid bounds
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            name: None,
            email: None,
            privilege: None,
            page: page.clamp(1, Self::MAX_PAGE),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        // Fields are public, so don't trust them to be clamped
        (self.page.max(1) - 1).saturating_mul(self.per_page.max(0))
    }

    /// Name filter, if set and non-blank
    pub fn name_filter(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// Email filter, if set and non-blank
    pub fn email_filter(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;

    /// Find member by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>>;

    /// List members matching the query, newest first
    async fn list(&self, query: &MemberQuery) -> RepoResult<Vec<Member>>;

    /// Insert a new member and return the stored row
    async fn create(&self, member: &NewMember) -> RepoResult<Member>;

    /// Overwrite all mutable columns of an existing member
    async fn update(&self, member: &Member) -> RepoResult<Member>;

    /// Hard delete a member (refresh tokens cascade)
    async fn delete(&self, id: MemberId) -> RepoResult<()>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a newly issued token
    async fn create(&self, token: &NewRefreshToken) -> RepoResult<RefreshToken>;

    /// Atomically remove and return the token matching both value and owner email.
    ///
    /// Returns `None` when no such token exists. Expired tokens are removed
    /// and returned as well; the caller decides what to do with them.
    async fn consume(&self, token: &str, member_email: &str) -> RepoResult<Option<RefreshToken>>;

    /// Remove every token belonging to a member, returning how many were removed
    async fn revoke_for_member(&self, member_id: MemberId) -> RepoResult<u64>;
}
