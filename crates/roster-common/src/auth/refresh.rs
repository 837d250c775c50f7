//! Opaque refresh token generation

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use roster_core::MemberId;

/// Random bytes per token
const TOKEN_BYTES: usize = 40;

/// Generate a new refresh token value: `<member id>.<base64url random>`
#[must_use]
pub fn generate_refresh_token(member_id: MemberId) -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    format!("{member_id}.{}", URL_SAFE_NO_PAD.encode(bytes))
}
