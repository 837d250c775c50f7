//! Member handlers
//!
//! Roster CRUD. Listing and creation are admin-only; everything addressed by
//! id is open to the member themselves or an admin.

use axum::{extract::State, Json};
use roster_service::{
    ListMembersQuery, LookupQuery, MemberResponse, MemberService, PaginatedResponse,
    ReplaceMemberRequest, SignupRequest, UpdateMemberRequest,
};

use crate::extractors::{AdminMember, AuthMember, SelfOrAdmin, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List members, newest first
///
/// GET /members
pub async fn list_members(
    State(state): State<AppState>,
    AdminMember(_admin): AdminMember,
    ValidatedQuery(query): ValidatedQuery<ListMembersQuery>,
) -> ApiResult<Json<PaginatedResponse<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let page = service.list(&query).await?;
    Ok(Json(page))
}

/// Create a member on someone else's behalf
///
/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    AdminMember(_admin): AdminMember,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let member = service.create(request).await?;
    Ok(Created(Json(MemberService::transform(&member))))
}

/// Get the authenticated member
///
/// GET /members/profile
pub async fn get_profile(AuthMember(member): AuthMember) -> Json<MemberResponse> {
    Json(MemberService::transform(&member))
}

/// Look a member up by email
///
/// GET /members/lookup?email=
pub async fn lookup_member(
    State(state): State<AppState>,
    AuthMember(actor): AuthMember,
    ValidatedQuery(query): ValidatedQuery<LookupQuery>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let member = service.lookup(&actor, &query.email).await?;
    Ok(Json(MemberService::transform(&member)))
}

/// Get a member by id
///
/// GET /members/:member_id
pub async fn get_member(
    State(state): State<AppState>,
    access: SelfOrAdmin,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let member = service.get(&access.actor, access.target).await?;
    Ok(Json(MemberService::transform(&member)))
}

/// Replace every mutable field of a member
///
/// PUT /members/:member_id
pub async fn replace_member(
    State(state): State<AppState>,
    access: SelfOrAdmin,
    ValidatedJson(request): ValidatedJson<ReplaceMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let existing = service.find_by_id(access.target).await?;
    let member = service.replace(existing, request, &access.actor).await?;
    Ok(Json(MemberService::transform(&member)))
}

/// Partially update a member
///
/// PATCH /members/:member_id
pub async fn update_member(
    State(state): State<AppState>,
    access: SelfOrAdmin,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let existing = service.find_by_id(access.target).await?;
    let member = service.update(existing, request, &access.actor).await?;
    Ok(Json(MemberService::transform(&member)))
}

/// Delete a member
///
/// DELETE /members/:member_id
pub async fn delete_member(
    State(state): State<AppState>,
    access: SelfOrAdmin,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.remove(&access.actor, access.target).await?;
    Ok(NoContent)
}
