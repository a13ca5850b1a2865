pub mod dashboard;
pub mod error;
pub mod health;
pub mod index;
pub mod login;
pub mod logout;
pub mod middleware;
pub mod oauth;
pub mod orgs;
pub mod routes;
pub mod security_headers;

use axum::{
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use snafu::ResultExt;

use crate::{Result, error::ResponseBuilderSnafu};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
pub const PKCE_VERIFIER_COOKIE: &str = "pkce_verifier";

pub use error::*;
pub use routes::*;

/// 302 redirect, `Redirect::to` answers with 303
pub fn found(location: &str) -> Response<Body> {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

pub fn html_response(status: StatusCode, html: String) -> Result<Response<Body>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(html))
        .context(ResponseBuilderSnafu)
}

#[cfg(test)]
mod tests;
