//! # roster-core
//!
//! Domain layer containing the member and refresh token entities, value objects,
//! and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Member, MemberProfile, NewMember, NewRefreshToken, RefreshToken};
pub use error::DomainError;
pub use traits::{MemberQuery, MemberRepository, RefreshTokenRepository, RepoResult};
pub use value_objects::{MemberId, MemberIdParseError, Privilege, PrivilegeParseError};
