//! Value objects - immutable types that represent domain concepts

mod member_id;
mod privilege;

pub use member_id::{MemberId, MemberIdParseError};
pub use privilege::{Privilege, PrivilegeParseError};
