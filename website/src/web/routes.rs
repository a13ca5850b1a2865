use axum::extract::DefaultBodyLimit;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Router, middleware};
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::ctx::Ctx;
use crate::error::ErrorInfo;
use crate::run::AppState;

use super::dashboard::dashboard_handler;
use super::health::health_handler;
use super::index::index_handler;
use super::login::{login_handler, post_login_handler};
use super::logout::logout_handler;
use super::middleware::{
    auth_middleware, require_api_auth_middleware, require_auth_middleware,
};
use super::oauth::oauth_callback_handler;
use super::orgs::{list_events_handler, org_stats_handler, search_projects_handler};
use super::security_headers::add_security_headers;
use super::{error_handler, handle_api_error, handle_error, log_error};

/// Forms on this site are tiny
const MAX_BODY_BYTES: usize = 16 * 1024;

/// The whole application with its cookie, tracing and header layers
pub fn build_router(state: AppState) -> Router {
    all_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(CookieManagerLayer::new()),
    )
}

pub fn all_routes(state: AppState) -> Router {
    Router::new()
        .merge(api_routes(state.clone()))
        .merge(public_routes(state.clone()))
        .merge(private_routes(state.clone()))
        .fallback(error_handler)
        .layer(middleware::from_fn(add_security_headers))
}

pub fn api_routes(state: AppState) -> Router {
    let org_routes = Router::new()
        .route("/api/orgs/{org_id}/stats", get(org_stats_handler))
        .route("/api/orgs/{org_id}/projects", get(search_projects_handler))
        .route("/api/orgs/{org_id}/events", get(list_events_handler))
        .route_layer(middleware::from_fn(require_api_auth_middleware))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/api/health", get(health_handler))
        .merge(org_routes)
        .layer(middleware::map_response(api_response_mapper))
        .with_state(state)
}

pub fn private_routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .layer(middleware::map_response(response_mapper))
        .route_layer(middleware::from_fn(require_auth_middleware))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

pub fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/login", get(login_handler))
        .route("/auth/login/{provider}", post(post_login_handler))
        .route("/auth/callback", get(oauth_callback_handler))
        .route("/logout", post(logout_handler))
        .layer(middleware::map_response(response_mapper))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

async fn response_mapper(Extension(ctx): Extension<Ctx>, res: Response) -> Response {
    let error = res.extensions().get::<ErrorInfo>();
    if let Some(e) = error {
        log_error(e);
        return handle_error(ctx.actor.clone(), e.clone());
    }
    res
}

async fn api_response_mapper(res: Response) -> Response {
    let error = res.extensions().get::<ErrorInfo>();
    if let Some(e) = error {
        log_error(e);
        return handle_api_error(e.clone());
    }
    res
}
