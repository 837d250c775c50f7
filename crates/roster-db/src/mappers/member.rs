//! Member model -> entity mapper

use roster_core::entities::{Member, MemberProfile};
use roster_core::error::DomainError;
use roster_core::value_objects::{MemberId, Privilege};

use crate::models::MemberModel;

/// Convert MemberModel to Member entity.
///
/// Fails only if the row holds a privilege the CHECK constraint should have rejected.
impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        let privilege: Privilege = model.privilege.parse().map_err(|e| {
            DomainError::DatabaseError(format!("member {}: {e}", model.id))
        })?;

        Ok(Member {
            id: MemberId::new(model.id),
            profile: MemberProfile {
                student_id: model.student_id,
                first_name: model.first_name,
                last_name: model.last_name,
                email: model.email,
                year: model.year,
                github: model.github,
                linkedin: model.linkedin,
                personal_website: model.personal_website,
                stack_overflow: model.stack_overflow,
                portfolium: model.portfolium,
                handshake: model.handshake,
                slack: model.slack,
                discord: model.discord,
                thumbnail: model.thumbnail,
            },
            password_hash: model.password_hash,
            privilege,
            active: model.active,
            banned: model.banned,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
