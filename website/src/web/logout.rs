use axum::{
    Extension,
    body::Body,
    extract::{Form, State},
    http::Response,
};
use tower_cookies::{Cookie, Cookies};
use tracing::warn;

use crate::{
    Error, Result,
    ctx::Ctx,
    models::CsrfFormPayload,
    run::AppState,
    services::token::{LOGOUT_CSRF_SUBJECT, verify_csrf_token},
};

use super::{AUTH_TOKEN_COOKIE, found};

pub async fn logout_handler(
    cookies: Cookies,
    Extension(ctx): Extension<Ctx>,
    State(state): State<AppState>,
    Form(payload): Form<CsrfFormPayload>,
) -> Result<Response<Body>> {
    if payload.token.is_empty() {
        return Err(Error::CsrfToken);
    }
    verify_csrf_token(&payload.token, LOGOUT_CSRF_SUBJECT, &state.config.jwt_secret)?;

    if let Some(token) = ctx.token() {
        state.auth_cache.invalidate(token);

        // Best effort, the cookie goes away regardless
        if let Err(e) = state.auth.sign_out(token).await {
            warn!("Unable to revoke session: {}", e);
        }
    }

    cookies.remove(Cookie::build(AUTH_TOKEN_COOKIE).path("/").build());

    Ok(found("/login"))
}
