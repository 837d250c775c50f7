//! Member service
//!
//! Roster CRUD with self-or-admin access rules. Only admins may touch
//! `privilege`, `active` and `banned`.

use roster_core::entities::{Member, MemberProfile, NewMember};
use roster_core::{DomainError, MemberId};
use tracing::{error, info, instrument};

use crate::dto::{ListMembersQuery, MemberResponse, PaginatedResponse, ReplaceMemberRequest, SignupRequest, UpdateMemberRequest};
use crate::validation::{validate_list_query, validate_member_replace, validate_member_update, validate_signup};

use super::auth::hash_blocking;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

fn ensure_can_manage(actor: &Member, target: MemberId) -> ServiceResult<()> {
    if actor.can_manage(target) {
        Ok(())
    } else {
        Err(DomainError::NotSelfOrAdmin.into())
    }
}

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public view of a member; the password hash never leaves through here
    pub fn transform(member: &Member) -> MemberResponse {
        MemberResponse::from(member)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<Member>> {
        let email = MemberProfile::normalize_email(email);
        Ok(self.ctx.member_repo().find_by_email(&email).await?)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(id).into())
    }

    /// Fetch a member's record on behalf of `actor`
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn get(&self, actor: &Member, id: MemberId) -> ServiceResult<Member> {
        ensure_can_manage(actor, id)?;
        self.find_by_id(id).await
    }

    /// Look a member up by email; non-admins may only look up themselves
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn lookup(&self, actor: &Member, email: &str) -> ServiceResult<Member> {
        let email = MemberProfile::normalize_email(email);
        if !actor.is_admin() && email != actor.email() {
            return Err(DomainError::NotSelfOrAdmin.into());
        }

        self.ctx
            .member_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", email))
    }

    /// List members, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListMembersQuery) -> ServiceResult<PaginatedResponse<MemberResponse>> {
        let query = validate_list_query(query)?;
        let members = self.ctx.member_repo().list(&query).await?;

        Ok(PaginatedResponse::new(
            members.iter().map(Self::transform).collect(),
            query.page,
            query.per_page,
        ))
    }

    /// Create a member (admin endpoint)
    ///
    /// Privilege, active and banned are forced to their defaults.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: SignupRequest) -> ServiceResult<Member> {
        validate_signup(&request)?;

        let (profile, password) = request
            .into_profile()
            .map_err(|e| ServiceError::validation(format!("thumbnail: {e}")))?;
        let password_hash = hash_blocking(self.ctx, password).await?;

        let member = self
            .ctx
            .member_repo()
            .create(&NewMember::regular(profile, password_hash))
            .await?;

        info!(member_id = %member.id, "Member created");
        Ok(member)
    }

    /// Overwrite every mutable field of `existing`
    ///
    /// Optional profile fields left out of the request are cleared. The
    /// password is always re-hashed, so outstanding refresh tokens are revoked.
    #[instrument(skip(self, existing, request, actor), fields(member_id = %existing.id, actor_id = %actor.id))]
    pub async fn replace(
        &self,
        existing: Member,
        request: ReplaceMemberRequest,
        actor: &Member,
    ) -> ServiceResult<Member> {
        ensure_can_manage(actor, existing.id)?;
        validate_member_replace(&request, actor.is_admin())?;

        let ReplaceMemberRequest {
            profile,
            privilege,
            active,
            banned,
        } = request;
        let (profile, password) = profile
            .into_profile()
            .map_err(|e| ServiceError::validation(format!("thumbnail: {e}")))?;
        let password_hash = hash_blocking(self.ctx, password).await?;

        let mut member = Member {
            profile,
            password_hash,
            ..existing
        };
        if actor.is_admin() {
            member.privilege = privilege.unwrap_or(member.privilege);
            member.active = active.unwrap_or(member.active);
            member.banned = banned.unwrap_or(member.banned);
        }

        let saved = self.ctx.member_repo().update(&member).await?;
        self.revoke_sessions(saved.id).await;

        info!("Member replaced");
        Ok(saved)
    }

    /// Merge the fields present in `request` into `existing`
    ///
    /// Changing the password or email revokes outstanding refresh tokens.
    #[instrument(skip(self, existing, request, actor), fields(member_id = %existing.id, actor_id = %actor.id))]
    pub async fn update(
        &self,
        existing: Member,
        request: UpdateMemberRequest,
        actor: &Member,
    ) -> ServiceResult<Member> {
        ensure_can_manage(actor, existing.id)?;
        validate_member_update(&request, actor.is_admin())?;

        let (privilege, active, banned) = (request.privilege, request.active, request.banned);
        let mut member = existing;
        let previous_email = member.profile.email.clone();

        let password = request
            .apply_to(&mut member.profile)
            .map_err(|e| ServiceError::validation(format!("thumbnail: {e}")))?;
        let password_changed = password.is_some();
        if let Some(password) = password {
            member.password_hash = hash_blocking(self.ctx, password).await?;
        }

        if actor.is_admin() {
            member.privilege = privilege.unwrap_or(member.privilege);
            member.active = active.unwrap_or(member.active);
            member.banned = banned.unwrap_or(member.banned);
        }

        let saved = self.ctx.member_repo().update(&member).await?;
        if password_changed || saved.profile.email != previous_email {
            self.revoke_sessions(saved.id).await;
        }

        info!("Member updated");
        Ok(saved)
    }

    /// Hard delete; refresh tokens go with the row
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn remove(&self, actor: &Member, id: MemberId) -> ServiceResult<()> {
        ensure_can_manage(actor, id)?;
        self.ctx.member_repo().delete(id).await?;

        info!(member_id = %id, "Member removed");
        Ok(())
    }

    /// The member row is already saved, so a failure here is logged rather
    /// than reported as a failed update.
    async fn revoke_sessions(&self, id: MemberId) {
        match self.ctx.refresh_token_repo().revoke_for_member(id).await {
            Ok(0) => {}
            Ok(revoked) => info!(member_id = %id, revoked, "Revoked refresh tokens"),
            Err(e) => error!(member_id = %id, error = %e, "Failed to revoke refresh tokens"),
        }
    }
}
