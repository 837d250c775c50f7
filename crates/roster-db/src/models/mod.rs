//! Database models - SQLx-compatible structs for PostgreSQL tables

mod member;
mod refresh_token;

pub use member::MemberModel;
pub(crate) use member::MEMBER_COLUMNS;
pub use refresh_token::RefreshTokenModel;
