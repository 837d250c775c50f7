//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Sign up a fresh member and return the request alongside the response
async fn signup(server: &TestServer) -> (SignupRequest, AuthResponse) {
    let request = SignupRequest::unique();
    let response = server.post("/signup", &request).await.unwrap();
    let auth = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

/// Sign up a member, promote them, and log in again
async fn signup_admin(server: &TestServer) -> AuthResponse {
    let (request, auth) = signup(server).await;
    server.promote_to_admin(auth.member.id).await.unwrap();

    let response = server
        .post("/login", &LoginRequest::from_signup(&request))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_returns_tokens_and_public_view() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    let response = server.post("/signup", &request).await.unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(body["tokenType"], "Bearer");
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refreshToken"].as_str().is_some_and(|t| !t.is_empty()));

    let member = &body["member"];
    assert_eq!(member["email"], request.email.as_str());
    assert_eq!(member["privilege"], "member");
    assert_eq!(member["active"], false);
    assert!(member.get("password").is_none());
    assert!(member.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_signup_ignores_privileged_fields() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();
    let mut body = serde_json::to_value(&request).unwrap();
    body["privilege"] = json!("admin");
    body["active"] = json!(true);

    let response = server.post("/signup", &body).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.member.privilege, "member");
    assert!(!auth.member.active);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (first, _) = signup(&server).await;

    let mut second = SignupRequest::unique();
    second.email = first.email.to_uppercase();

    let response = server.post("/signup", &second).await.unwrap();
    let error = assert_error(response, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS")
        .await
        .unwrap();
    assert_eq!(error["details"][0]["field"], "email");
}

#[tokio::test]
async fn test_signup_duplicate_student_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (first, _) = signup(&server).await;

    let mut second = SignupRequest::unique();
    second.student_id = first.student_id;

    let response = server.post("/signup", &second).await.unwrap();
    let error = assert_error(response, StatusCode::CONFLICT, "STUDENT_ID_ALREADY_EXISTS")
        .await
        .unwrap();
    assert_eq!(error["details"][0]["field"], "studentId");
}

#[tokio::test]
async fn test_signup_invalid_fields() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignupRequest::unique();
    request.email = "not-an-email".to_string();
    request.password = "123".to_string();
    request.github = Some("nope".to_string());

    let response = server.post("/signup", &request).await.unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    let fields: Vec<&str> = error["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["field"].as_str())
        .collect();
    assert_eq!(fields, ["email", "github", "password"]);
}

#[tokio::test]
async fn test_blank_names_are_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignupRequest::unique();
    request.student_id = "   ".to_string();

    let response = server.post("/signup", &request).await.unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
    assert_eq!(error["details"][0]["field"], "studentId");

    let (_, auth) = signup(&server).await;
    let path = format!("/members/{}", auth.member.id);
    let response = server
        .patch_auth(&path, &auth.tokens.access_token, &json!({ "lastName": "  " }))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
    assert_eq!(error["details"][0]["field"], "lastName");
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = signup(&server).await;

    let response = server
        .post("/login", &LoginRequest::from_signup(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.member.email, request.email);
    assert_eq!(auth.tokens.token_type, "Bearer");
    assert!(auth.tokens.expires_in > 0);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = signup(&server).await;

    let wrong_password = LoginRequest {
        email: request.email.clone(),
        password: "wrong-password".to_string(),
    };
    let unknown_email = LoginRequest {
        email: format!("nobody-{}@example.com", unique_suffix()),
        password: request.password.clone(),
    };

    let first = server.post("/login", &wrong_password).await.unwrap();
    let first = assert_error(first, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
    let second = server.post("/login", &unknown_email).await.unwrap();
    let second = assert_error(second, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = signup(&server).await;

    let refresh = RefreshTokenRequest {
        email: request.email.clone(),
        refresh_token: auth.tokens.refresh_token,
    };

    let response = server.post("/refresh-token", &refresh).await.unwrap();
    let tokens: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(tokens.refresh_token, refresh.refresh_token);

    let response = server.post("/refresh-token", &refresh).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_REFRESH_TOKEN")
        .await
        .unwrap();

    // The replacement still works
    let next = RefreshTokenRequest {
        email: request.email,
        refresh_token: tokens.refresh_token,
    };
    let response = server.post("/refresh-token", &next).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_requires_matching_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup(&server).await;
    let (other, _) = signup(&server).await;

    let refresh = RefreshTokenRequest {
        email: other.email,
        refresh_token: auth.tokens.refresh_token,
    };

    let response = server.post("/refresh-token", &refresh).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_REFRESH_TOKEN")
        .await
        .unwrap();
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_get_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = signup(&server).await;

    let response = server
        .get_auth("/members/profile", &auth.tokens.access_token)
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(member.email, request.email);
    assert_eq!(member.id, auth.member.id);
}

#[tokio::test]
async fn test_member_cannot_touch_another_member() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, a) = signup(&server).await;
    let (b_request, b) = signup(&server).await;
    let token = &a.tokens.access_token;
    let path = format!("/members/{}", b.member.id);

    let response = server.get_auth(&path, token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await.unwrap();

    let response = server
        .patch_auth(&path, token, &json!({ "firstName": "Mallory" }))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await.unwrap();

    // Forbidden even when the payload is garbage
    let response = server
        .patch_auth(&path, token, &json!({ "email": "not-an-email" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let lookup = format!("/members/lookup?email={}", b_request.email);
    let response = server.get_auth(&lookup, token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth("/members", token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_member_updates_own_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = signup(&server).await;
    let path = format!("/members/{}", auth.member.id);

    let response = server
        .patch_auth(
            &path,
            &auth.tokens.access_token,
            &json!({ "firstName": "Grace", "github": "https://github.com/grace" }),
        )
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(member.first_name, "Grace");
    assert_eq!(member.last_name, request.last_name);
    assert_eq!(member.github.as_deref(), Some("https://github.com/grace"));
}

#[tokio::test]
async fn test_member_cannot_grant_themselves_privileges() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup(&server).await;
    let path = format!("/members/{}", auth.member.id);

    let response = server
        .patch_auth(&path, &auth.tokens.access_token, &json!({ "privilege": "admin" }))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await.unwrap();
}

#[tokio::test]
async fn test_email_change_revokes_refresh_tokens() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = signup(&server).await;
    let path = format!("/members/{}", auth.member.id);
    let new_email = format!("moved-{}@example.com", unique_suffix());

    let response = server
        .patch_auth(&path, &auth.tokens.access_token, &json!({ "email": new_email }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    for email in [request.email, new_email] {
        let refresh = RefreshTokenRequest {
            email,
            refresh_token: auth.tokens.refresh_token.clone(),
        };
        let response = server.post("/refresh-token", &refresh).await.unwrap();
        assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    }
}

#[tokio::test]
async fn test_invalid_member_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signup(&server).await;

    for path in ["/members/abc", "/members/0", "/members/-3"] {
        let response = server.get_auth(path, &auth.tokens.access_token).await.unwrap();
        assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_delete_self() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = signup(&server).await;
    let path = format!("/members/{}", auth.member.id);

    let response = server.delete_auth(&path, &auth.tokens.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post("/login", &LoginRequest::from_signup(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_lists_members() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = signup_admin(&server).await;
    let (_, newest) = signup(&server).await;

    let response = server
        .get_auth("/members?page=1&perPage=5", &admin.tokens.access_token)
        .await
        .unwrap();
    let page: MemberPage = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 5);
    assert!(page.data.len() <= 5);
    assert!(page.data.iter().any(|m| m.id == newest.member.id));
}

#[tokio::test]
async fn test_email_filter_pages_and_lookup_returns_one() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = signup_admin(&server).await;
    let (request, member) = signup(&server).await;
    let token = &admin.tokens.access_token;

    let filter = format!("/members?email={}", request.email.to_uppercase());
    let response = server.get_auth(&filter, token).await.unwrap();
    let page: MemberPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.page, 1);
    assert!(page.data.iter().any(|m| m.id == member.member.id));

    let lookup = format!("/members/lookup?email={}", request.email);
    let response = server.get_auth(&lookup, token).await.unwrap();
    let found: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.id, member.member.id);

    let response = server
        .get_auth("/members/lookup?email=nobody@nowhere.edu", token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_admin_list_rejects_bad_query() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = signup_admin(&server).await;

    let response = server
        .get_auth("/members?page=0", &admin.tokens.access_token)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
    assert_eq!(error["details"][0]["location"], "query");

    let response = server
        .get_auth("/members?page=9223372036854775807", &admin.tokens.access_token)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
    assert_eq!(error["details"][0]["field"], "page");
}

#[tokio::test]
async fn test_admin_creates_and_manages_member() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = signup_admin(&server).await;
    let token = &admin.tokens.access_token;

    let mut body = serde_json::to_value(SignupRequest::unique()).unwrap();
    body["privilege"] = json!("admin");
    let response = server.post_auth("/members", token, &body).await.unwrap();
    let created: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.privilege, "member");

    let path = format!("/members/{}", created.id);
    let response = server
        .patch_auth(&path, token, &json!({ "active": true, "banned": true }))
        .await
        .unwrap();
    let updated: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(updated.active);
    assert!(updated.banned);

    let lookup = format!("/members/lookup?email={}", created.email);
    let response = server.get_auth(&lookup, token).await.unwrap();
    let found: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.id, created.id);

    let response = server.delete_auth(&path, token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_MEMBER").await.unwrap();
}

#[tokio::test]
async fn test_admin_replaces_member() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = signup_admin(&server).await;
    let (_, target) = signup(&server).await;
    let path = format!("/members/{}", target.member.id);

    let mut replacement = serde_json::to_value(SignupRequest::unique()).unwrap();
    replacement["privilege"] = json!("admin");
    replacement["active"] = json!(true);

    let response = server
        .put_auth(&path, &admin.tokens.access_token, &replacement)
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(member.id, target.member.id);
    assert_eq!(member.email, replacement["email"].as_str().unwrap());
    assert_eq!(member.privilege, "admin");
    assert!(member.active);
}
