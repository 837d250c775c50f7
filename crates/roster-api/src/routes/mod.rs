//! Route definitions
//!
//! Auth endpoints at the root, member endpoints under /members.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health, members};
use crate::response::ApiError;
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(member_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// JSON 404 for unmatched routes
pub async fn fallback() -> ApiError {
    ApiError::RouteNotFound
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/refresh-token", post(auth::refresh_token))
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/members/profile", get(members::get_profile))
        .route("/members/lookup", get(members::lookup_member))
        .route(
            "/members/:member_id",
            get(members::get_member)
                .put(members::replace_member)
                .patch(members::update_member)
                .delete(members::delete_member),
        )
}
