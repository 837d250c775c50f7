//! Authentication utilities

mod jwt;
mod password;
mod refresh;

pub use jwt::{AccessToken, Claims, JwtService};
pub use password::{hash_password, verify_password, PasswordService};
pub use refresh::generate_refresh_token;
