use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::{
    Error, Result,
    error::CsrfTokenSnafu,
};

pub const LOGIN_CSRF_SUBJECT: &str = "login";
pub const LOGOUT_CSRF_SUBJECT: &str = "logout";

#[derive(Deserialize, Serialize)]
struct CsrfClaims {
    sub: String,
    exp: usize,
}

pub fn create_csrf_token_svc(subject: &str, secret: &str) -> Result<String> {
    // Limit up to 1 hour only
    let exp = Utc::now() + Duration::hours(1);

    let claims = CsrfClaims {
        sub: subject.to_string(),
        exp: exp.timestamp() as usize,
    };

    let Ok(token) = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    ) else {
        return Err("Error creating CSRF token".into());
    };

    Ok(token)
}

/// Accepts the token only when it was issued for `subject`
pub fn verify_csrf_token(token: &str, subject: &str, secret: &str) -> Result<()> {
    let Ok(decoded) = decode::<CsrfClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) else {
        return Err(Error::CsrfToken);
    };

    ensure!(decoded.claims.sub == subject, CsrfTokenSnafu);
    Ok(())
}
