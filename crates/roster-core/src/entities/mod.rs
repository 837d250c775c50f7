//! Domain entities - core business objects

mod member;
mod refresh_token;

pub use member::{Member, MemberProfile, NewMember};
pub use refresh_token::{NewRefreshToken, RefreshToken};
