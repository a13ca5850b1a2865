use axum::Json;

use crate::{Error, Result};
use tenancy::health::{HealthResponse, validate_health};
use tenancy::validators::flatten_errors;

pub async fn health_handler() -> Result<Json<HealthResponse>> {
    checked_health(HealthResponse::now())
}

/// Refuses to send a payload that breaks the health contract
fn checked_health(payload: HealthResponse) -> Result<Json<HealthResponse>> {
    if let Err(errors) = validate_health(&payload) {
        return Err(Error::HealthContract {
            msg: flatten_errors(&errors),
        });
    }

    Ok(Json(payload))
}
