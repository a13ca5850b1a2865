use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::utils::datetime_now_str;
use crate::validators;

pub const OK_STATUS: &str = "ok";

/// Fixed name this deployment reports on the health endpoint
pub const SERVICE_NAME: &str = "supabase-boilerplate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HealthResponse {
    #[validate(custom(function = "validators::ok_status"))]
    pub status: String,

    #[validate(custom(function = "validators::service_name"))]
    pub service: String,

    #[validate(custom(function = "validators::datetime"))]
    pub timestamp: String,
}

impl HealthResponse {
    /// Liveness payload stamped with the current instant
    pub fn now() -> Self {
        HealthResponse {
            status: OK_STATUS.to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: datetime_now_str(),
        }
    }
}

/// Checks the payload against the health contract before it leaves the process.
///
/// Any error here is a bug in the code that built the payload.
pub fn validate_health(payload: &HealthResponse) -> Result<(), ValidationErrors> {
    payload.validate()
}
