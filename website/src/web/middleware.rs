use axum::{
    Extension,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{Error, Result, ctx::Ctx, run::AppState, services::auth::authenticate_token};
use tenancy::actor::Actor;

use super::{AUTH_TOKEN_COOKIE, found};

/// Resolves the session cookie but does not require it to be valid
pub async fn auth_middleware(
    state: State<AppState>,
    cookies: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = cookies
        .get(AUTH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty());

    // Allow ctx to be always present
    let mut ctx = Ctx::new(Actor::default(), None);

    if let Some(token) = token {
        let actor = authenticate_token(&state, &token).await;
        if actor.is_authenticated() {
            ctx = Ctx::new(actor, Some(token));
        }
    }

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

/// Pages send anonymous visitors to the login page
pub async fn require_auth_middleware(ctx: Extension<Ctx>, req: Request, next: Next) -> Response {
    if !ctx.actor.is_authenticated() {
        return found("/login");
    }

    next.run(req).await
}

/// API routes answer anonymous callers with 401
pub async fn require_api_auth_middleware(
    ctx: Extension<Ctx>,
    req: Request,
    next: Next,
) -> Result<Response> {
    if !ctx.actor.is_authenticated() {
        return Err(Error::LoginRequired);
    }

    Ok(next.run(req).await)
}
