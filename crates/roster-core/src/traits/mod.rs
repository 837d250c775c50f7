//! Repository ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{MemberQuery, MemberRepository, RefreshTokenRepository, RepoResult};
