use askama::Template;
use axum::{
    Extension,
    body::Body,
    extract::{Form, Path, Query, State},
    http::Response,
};
use serde::Deserialize;
use snafu::ResultExt;
use tower_cookies::{
    Cookie, Cookies,
    cookie::{SameSite, time::Duration},
};
use tracing::error;
use validator::Validate;

use crate::{
    Error, Result,
    ctx::Ctx,
    error::{ResponseBuilderSnafu, TemplateSnafu},
    models::{CsrfFormPayload, LoginError, LoginForm, OAuthProvider, TemplateData},
    run::AppState,
    services::token::{LOGIN_CSRF_SUBJECT, create_csrf_token_svc, verify_csrf_token},
};
use tenancy::actor::Actor;
use tenancy::utils::callback_url;

use super::{PKCE_VERIFIER_COOKIE, found};

#[derive(Template)]
#[template(path = "pages/login.html")]
struct LoginTemplate {
    t: TemplateData,
    token: String,
    providers: Vec<OAuthProvider>,
    busy: bool,
    error_message: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

pub async fn login_handler(
    Extension(ctx): Extension<Ctx>,
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response<Body>> {
    if ctx.actor.is_authenticated() {
        return Ok(found("/dashboard"));
    }

    let error_message = query
        .error
        .as_deref()
        .and_then(LoginError::from_code)
        .map(|e| e.message().to_string());

    render_login(&state, &LoginForm::default(), error_message)
}

/// Starts an OAuth sign-in with the provider named in the path
pub async fn post_login_handler(
    cookies: Cookies,
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Form(payload): Form<CsrfFormPayload>,
) -> Result<Response<Body>> {
    if payload.validate().is_err() {
        return Err(Error::CsrfToken);
    }
    verify_csrf_token(&payload.token, LOGIN_CSRF_SUBJECT, &state.config.jwt_secret)?;

    let provider = OAuthProvider::try_from(provider.as_str())
        .map_err(|msg| Error::BadRequest { msg })?;

    // Fresh per request, the guard only has to clear the flag again
    let form = LoginForm::default();
    let guard = form.begin_sign_in();

    let redirect_to = callback_url(&state.config.site_url);
    let result = state.auth.sign_in_with_oauth(provider, &redirect_to).await;
    drop(guard);

    match result {
        Ok(redirect) => {
            let pkce_cookie = Cookie::build((PKCE_VERIFIER_COOKIE, redirect.code_verifier))
                .http_only(true)
                .max_age(Duration::minutes(10))
                .secure(state.config.server.https)
                .same_site(SameSite::Lax)
                .path("/")
                .build();
            cookies.add(pkce_cookie);

            Ok(found(&redirect.url))
        }
        Err(e) => {
            error!("OAuth error: {}", e);
            let msg = format!("Unable to sign in with {}. Try again.", provider.label());
            render_login(&state, &form, Some(msg))
        }
    }
}

fn render_login(
    state: &AppState,
    form: &LoginForm,
    error_message: Option<String>,
) -> Result<Response<Body>> {
    let mut t = TemplateData::new(Actor::default());
    t.title = String::from("Login");

    let tpl = LoginTemplate {
        t,
        token: create_csrf_token_svc(LOGIN_CSRF_SUBJECT, &state.config.jwt_secret)?,
        providers: OAuthProvider::ALL.to_vec(),
        busy: form.is_busy(),
        error_message,
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Surrogate-Control", "no-store")
        .header(
            "Cache-Control",
            "no-store, no-cache, must-revalidate, proxy-revalidate",
        )
        .header("Pragma", "no-cache")
        .header("Expires", 0)
        .body(Body::from(tpl.render().context(TemplateSnafu)?))
        .context(ResponseBuilderSnafu)
}
