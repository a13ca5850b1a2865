use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use std::sync::Arc;

use crate::run::create_test_state;
use crate::services::auth::mock::{LONELY_TOKEN, MockIdentityProvider, TEST_TOKEN};
use crate::services::token::{LOGIN_CSRF_SUBJECT, LOGOUT_CSRF_SUBJECT, create_csrf_token_svc};
use db::org::{TEST_ORG_ID, TEST_OTHER_ORG_ID, TEST_VIEWER_ORG_ID};
use tenancy::dto::{ErrorMessageDto, EventDto, OrgStatsDto, ProjectDto};
use tenancy::health::{HealthResponse, validate_health};

use super::build_router;

fn test_server(mock: Arc<MockIdentityProvider>) -> TestServer {
    let state = create_test_state(mock);
    TestServer::new(build_router(state)).unwrap()
}

fn cookie(name: &str, value: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{}={}", name, value)).unwrap()
}

fn session(token: &str) -> HeaderValue {
    cookie("auth_token", token)
}

#[tokio::test]
async fn test_health() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("x-frame-options"), "DENY");

    let payload = response.json::<HealthResponse>();
    assert_eq!(payload.status, "ok");
    assert_eq!(payload.service, "supabase-boilerplate");
    assert!(validate_health(&payload).is_ok());
}

#[tokio::test]
async fn test_home_page() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("href=\"/login\""));

    let response = server
        .get("/")
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/dashboard");
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server.get("/dashboard").await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/login");

    let response = server
        .get("/dashboard")
        .add_header(header::COOKIE, session("expired-token"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_dashboard_lists_memberships() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server
        .get("/dashboard")
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains("Dashboard"));
    assert!(html.contains("Jorge Ledezma"));
    assert!(html.contains("jorge@example.com"));
    assert!(html.contains("2024-01-15"));
    assert!(html.contains("Zoada Labs"));
    assert!(html.contains("@zoada-labs"));
    assert!(html.contains("<span class=\"badge badge-primary\">owner</span>"));
    assert!(html.contains("Acme Corp"));
    assert!(html.contains("<span class=\"badge badge-default\">viewer</span>"));
    assert!(!html.contains("Hidden Inc"));
    assert!(!html.contains("You are not a member of any organizations yet"));
    assert!(!html.contains("Create Organization"));
}

#[tokio::test]
async fn test_dashboard_without_memberships() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server
        .get("/dashboard")
        .add_header(header::COOKIE, session(LONELY_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains("You are not a member of any organizations yet"));
    assert!(html.contains("lonely@example.com"));
    assert!(html.contains(
        "<button type=\"button\" class=\"button button-primary\">Create Organization</button>"
    ));
    assert!(!html.contains("class=\"badge "));
}

#[tokio::test]
async fn test_login_page() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server.get("/login").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Continue with Google"));
    assert!(html.contains("Continue with GitHub"));
    assert!(html.contains("action=\"/auth/login/google\""));
    assert!(!html.contains("disabled"));

    let response = server
        .get("/login")
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/dashboard");
}

#[tokio::test]
async fn test_google_sign_in() {
    let mock = Arc::new(MockIdentityProvider::new());
    let server = test_server(mock.clone());
    let token = create_csrf_token_svc(LOGIN_CSRF_SUBJECT, "secret").unwrap();

    let response = server
        .post("/auth/login/google")
        .form(&[("token", token.as_str())])
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        "https://auth.example.com/authorize?provider=google"
    );
    assert_eq!(response.cookie("pkce_verifier").value(), "test-verifier");
    assert_eq!(
        mock.sign_in_calls(),
        vec![(
            "google".to_string(),
            "http://localhost:3000/auth/callback".to_string()
        )]
    );
}

#[tokio::test]
async fn test_github_sign_in() {
    let mock = Arc::new(MockIdentityProvider::new());
    let server = test_server(mock.clone());
    let token = create_csrf_token_svc(LOGIN_CSRF_SUBJECT, "secret").unwrap();

    let response = server
        .post("/auth/login/github")
        .form(&[("token", token.as_str())])
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    let calls = mock.sign_in_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "github");
}

#[tokio::test]
async fn test_failed_sign_in_renders_login() {
    let mock = Arc::new(MockIdentityProvider::failing());
    let server = test_server(mock.clone());
    let token = create_csrf_token_svc(LOGIN_CSRF_SUBJECT, "secret").unwrap();

    let response = server
        .post("/auth/login/google")
        .form(&[("token", token.as_str())])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Unable to sign in with Google. Try again."));
    assert!(html.contains("Continue with Google"));
    assert!(!html.contains("disabled"));

    // No retry
    assert_eq!(mock.sign_in_calls().len(), 1);
}

#[tokio::test]
async fn test_sign_in_rejects_bad_requests() {
    let mock = Arc::new(MockIdentityProvider::new());
    let server = test_server(mock.clone());

    let response = server
        .post("/auth/login/google")
        .form(&[("token", "forged")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let wrong_form = create_csrf_token_svc(LOGOUT_CSRF_SUBJECT, "secret").unwrap();
    let response = server
        .post("/auth/login/google")
        .form(&[("token", wrong_form.as_str())])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let token = create_csrf_token_svc(LOGIN_CSRF_SUBJECT, "secret").unwrap();
    let response = server
        .post("/auth/login/facebook")
        .form(&[("token", token.as_str())])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    assert!(mock.sign_in_calls().is_empty());
}

#[tokio::test]
async fn test_oauth_callback() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server
        .get("/auth/callback")
        .add_query_param("code", "good-code")
        .add_header(header::COOKIE, cookie("pkce_verifier", "test-verifier"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/dashboard");
    assert_eq!(response.cookie("auth_token").value(), TEST_TOKEN);
}

#[tokio::test]
async fn test_oauth_callback_failures() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    // Verifier cookie is gone
    let response = server
        .get("/auth/callback")
        .add_query_param("code", "good-code")
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/login?error=expired");

    let response = server
        .get("/auth/callback")
        .add_query_param("code", "bad-code")
        .add_header(header::COOKIE, cookie("pkce_verifier", "test-verifier"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/login?error=failed");

    let response = server
        .get("/auth/callback")
        .add_query_param("error", "access_denied")
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/login?error=access_denied");

    // Provider text never travels to the login page
    let response = server
        .get("/auth/callback")
        .add_query_param("error", "server_error")
        .add_query_param("error_description", "Call +1 555 0100 to verify")
        .await;
    assert_eq!(response.header("location"), "/login?error=failed");
}

#[tokio::test]
async fn test_login_error_messages_are_fixed() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server
        .get("/login")
        .add_query_param("error", "expired")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Sign in expired. Try again."));

    let response = server
        .get("/login")
        .add_query_param("error", "Your account is locked, call 555 0100")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(!html.contains("Your account is locked"));
    assert!(!html.contains("role=\"alert\""));
}

#[tokio::test]
async fn test_logout() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));
    let token = create_csrf_token_svc(LOGOUT_CSRF_SUBJECT, "secret").unwrap();

    let response = server
        .post("/logout")
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .form(&[("token", token.as_str())])
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/login");
    assert_eq!(response.cookie("auth_token").value(), "");
}

#[tokio::test]
async fn test_org_endpoints_require_session() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    for path in ["stats", "projects", "events"] {
        let response = server
            .get(&format!("/api/orgs/{}/{}", TEST_ORG_ID, path))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let body = response.json::<ErrorMessageDto>();
        assert_eq!(body.status_code, 401);
        assert_eq!(body.error, "Unauthorized");
    }
}

#[tokio::test]
async fn test_org_stats() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server
        .get(&format!("/api/orgs/{}/stats", TEST_ORG_ID))
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<OrgStatsDto>(),
        OrgStatsDto {
            member_count: 1,
            project_count: 2,
            active_project_count: 1,
            event_count: 2,
        }
    );
}

#[tokio::test]
async fn test_org_endpoints_deny_non_members() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    for org_id in [TEST_OTHER_ORG_ID.to_string(), "not-a-uuid".to_string()] {
        for path in ["stats", "projects", "events"] {
            let response = server
                .get(&format!("/api/orgs/{}/{}", org_id, path))
                .add_header(header::COOKIE, session(TEST_TOKEN))
                .await;
            assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
            let body = response.json::<ErrorMessageDto>();
            assert_eq!(body.message, "You are not a member of this organization");
        }
    }

    // Lonely user has no memberships at all
    let response = server
        .get(&format!("/api/orgs/{}/stats", TEST_ORG_ID))
        .add_header(header::COOKIE, session(LONELY_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_events_require_admin() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server
        .get(&format!("/api/orgs/{}/events", TEST_VIEWER_ORG_ID))
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body = response.json::<ErrorMessageDto>();
    assert_eq!(body.message, "Requires admin role or higher");

    // Viewers can still read stats
    let response = server
        .get(&format!("/api/orgs/{}/stats", TEST_VIEWER_ORG_ID))
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get(&format!("/api/orgs/{}/events", TEST_ORG_ID))
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .add_query_param("limit", 1)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let events = response.json::<Vec<EventDto>>();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "project.created");
}

#[tokio::test]
async fn test_search_projects() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server
        .get(&format!("/api/orgs/{}/projects", TEST_ORG_ID))
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let names: Vec<String> = response
        .json::<Vec<ProjectDto>>()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Website redesign", "Roadmap"]);

    let response = server
        .get(&format!("/api/orgs/{}/projects", TEST_ORG_ID))
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .add_query_param("q", "road")
        .await;
    let projects = response.json::<Vec<ProjectDto>>();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Roadmap");

    let response = server
        .get(&format!("/api/orgs/{}/projects", TEST_ORG_ID))
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .add_query_param("status", "deleted")
        .await;
    let projects = response.json::<Vec<ProjectDto>>();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Old site");
}

#[tokio::test]
async fn test_invalid_query_params() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));
    let projects = format!("/api/orgs/{}/projects", TEST_ORG_ID);
    let events = format!("/api/orgs/{}/events", TEST_ORG_ID);

    let long_q = "x".repeat(101);
    let cases: Vec<(&str, &str, &str)> = vec![
        (&projects, "q", &long_q),
        (&projects, "status", "published"),
        (&events, "limit", "0"),
        (&events, "limit", "101"),
        (&events, "limit", "abc"),
    ];

    for (path, key, value) in cases {
        let response = server
            .get(path)
            .add_header(header::COOKIE, session(TEST_TOKEN))
            .add_query_param(key, value)
            .await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "{}?{}={}",
            path,
            key,
            value
        );
        let body = response.json::<ErrorMessageDto>();
        assert_eq!(body.status_code, 400);
    }
}

#[tokio::test]
async fn test_unknown_path() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let html = response.text();
    assert!(html.contains("404 Not Found"));
    assert!(html.contains("The page you are looking for cannot be found."));
    assert!(html.contains("Back to home"));
}

#[tokio::test]
async fn test_error_page_links_back_to_dashboard() {
    let server = test_server(Arc::new(MockIdentityProvider::new()));

    let response = server
        .post("/logout")
        .add_header(header::COOKIE, session(TEST_TOKEN))
        .form(&[("token", "forged")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let html = response.text();
    assert!(html.contains("Stale form data. Refresh the page and try again."));
    assert!(html.contains("href=\"/dashboard\""));
    assert!(!html.contains("Back to home"));
}
