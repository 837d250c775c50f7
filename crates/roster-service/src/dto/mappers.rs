//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs, and
//! from request DTOs to domain profiles.

use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, Engine};

use roster_core::entities::{Member, MemberProfile};

use super::requests::{SignupRequest, UpdateMemberRequest};
use super::responses::MemberResponse;

/// Largest accepted thumbnail after decoding
pub const MAX_THUMBNAIL_BYTES: usize = 256 * 1024;

pub(crate) fn decode_thumbnail(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(encoded.trim())
}

pub(crate) fn encode_thumbnail(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        let p = &member.profile;
        Self {
            id: member.id.into_inner(),
            student_id: p.student_id.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            email: p.email.clone(),
            year: p.year.clone(),
            github: p.github.clone(),
            linkedin: p.linkedin.clone(),
            personal_website: p.personal_website.clone(),
            stack_overflow: p.stack_overflow.clone(),
            portfolium: p.portfolium.clone(),
            handshake: p.handshake.clone(),
            slack: p.slack.clone(),
            discord: p.discord.clone(),
            thumbnail: p.thumbnail.as_deref().map(encode_thumbnail),
            privilege: member.privilege,
            active: member.active,
            banned: member.banned,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

// ============================================================================
// Request Mappers
// ============================================================================

impl SignupRequest {
    /// Split into the profile and the plaintext password.
    ///
    /// Names are trimmed, the email is normalized and the thumbnail is decoded.
    pub fn into_profile(self) -> Result<(MemberProfile, String), DecodeError> {
        let thumbnail = self.thumbnail.as_deref().map(decode_thumbnail).transpose()?;

        let profile = MemberProfile {
            student_id: self.student_id.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: MemberProfile::normalize_email(&self.email),
            year: self.year,
            github: self.github,
            linkedin: self.linkedin,
            personal_website: self.personal_website,
            stack_overflow: self.stack_overflow,
            portfolium: self.portfolium,
            handshake: self.handshake,
            slack: self.slack,
            discord: self.discord,
            thumbnail,
        };

        Ok((profile, self.password))
    }
}

fn merge<T>(target: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *target = value;
    }
}

impl UpdateMemberRequest {
    /// Apply present fields onto `profile`, returning the new plaintext
    /// password if one was supplied.
    pub fn apply_to(self, profile: &mut MemberProfile) -> Result<Option<String>, DecodeError> {
        let thumbnail = match self.thumbnail {
            Some(Some(encoded)) => Some(Some(decode_thumbnail(&encoded)?)),
            Some(None) => Some(None),
            None => None,
        };

        merge(&mut profile.student_id, self.student_id.map(|s| s.trim().to_string()));
        merge(&mut profile.first_name, self.first_name.map(|s| s.trim().to_string()));
        merge(&mut profile.last_name, self.last_name.map(|s| s.trim().to_string()));
        merge(
            &mut profile.email,
            self.email.as_deref().map(MemberProfile::normalize_email),
        );
        merge(&mut profile.year, self.year);
        merge(&mut profile.github, self.github);
        merge(&mut profile.linkedin, self.linkedin);
        merge(&mut profile.personal_website, self.personal_website);
        merge(&mut profile.stack_overflow, self.stack_overflow);
        merge(&mut profile.portfolium, self.portfolium);
        merge(&mut profile.handshake, self.handshake);
        merge(&mut profile.slack, self.slack);
        merge(&mut profile.discord, self.discord);
        merge(&mut profile.thumbnail, thumbnail);

        Ok(self.password)
    }
}
