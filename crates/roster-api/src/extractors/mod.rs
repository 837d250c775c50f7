//! Axum extractors for request handling
//!
//! Custom extractors for authentication, access control, path parsing and
//! validation.

mod auth;
mod path;
mod validated;

pub use auth::{AdminMember, AuthMember, SelfOrAdmin};
pub use path::{MemberIdPath, MemberPath};
pub use validated::{ValidatedJson, ValidatedQuery};
