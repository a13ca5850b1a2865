use axum::{
    body::Body,
    extract::{Query, State},
    http::Response,
};
use serde::Deserialize;
use tower_cookies::{
    Cookie, Cookies,
    cookie::{SameSite, time::Duration},
};
use tracing::{error, warn};

use crate::{models::LoginError, run::AppState};

use super::{AUTH_TOKEN_COOKIE, PKCE_VERIFIER_COOKIE, found};

/// Default session cookie lifetime when the provider does not say
const DEFAULT_SESSION_SECS: i64 = 60 * 60;

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Where the identity provider sends the browser back after sign-in
pub async fn oauth_callback_handler(
    cookies: Cookies,
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response<Body> {
    let verifier = cookies
        .get(PKCE_VERIFIER_COOKIE)
        .map(|c| c.value().to_string());
    cookies.remove(Cookie::build(PKCE_VERIFIER_COOKIE).path("/").build());

    if let Some(err) = query.error {
        let detail = query.error_description.as_deref().unwrap_or(&err);
        warn!("Sign in was not completed: {}", detail);

        return match err.as_str() {
            "access_denied" => login_error(LoginError::AccessDenied),
            _ => login_error(LoginError::Failed),
        };
    }

    let (Some(code), Some(verifier)) = (query.code, verifier) else {
        return login_error(LoginError::Expired);
    };

    match state.auth.exchange_code(&code, &verifier).await {
        Ok(session) => {
            let max_age = session
                .expires_in
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_SESSION_SECS);

            let auth_cookie = Cookie::build((AUTH_TOKEN_COOKIE, session.access_token))
                .http_only(true)
                .max_age(Duration::seconds(max_age))
                .secure(state.config.server.https)
                .same_site(SameSite::Lax)
                .path("/")
                .build();
            cookies.add(auth_cookie);

            found("/dashboard")
        }
        Err(e) => {
            error!("Unable to exchange sign in code: {}", e);
            login_error(LoginError::Failed)
        }
    }
}

fn login_error(err: LoginError) -> Response<Body> {
    found(&format!("/login?error={}", err.as_str()))
}
