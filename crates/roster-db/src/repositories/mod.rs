//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in roster-core.

mod error;
mod member;
mod refresh_token;

pub use member::PgMemberRepository;
pub use refresh_token::PgRefreshTokenRepository;
