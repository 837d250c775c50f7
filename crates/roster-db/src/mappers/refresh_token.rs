//! RefreshToken model -> entity mapper

use roster_core::entities::RefreshToken;
use roster_core::value_objects::MemberId;

use crate::models::RefreshTokenModel;

impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            token: model.token,
            member_id: MemberId::new(model.member_id),
            member_email: model.member_email,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
