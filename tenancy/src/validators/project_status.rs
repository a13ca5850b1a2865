use core::result::Result;
use validator::ValidationError;

use crate::dto::ProjectStatus;

pub fn project_status(value: &str) -> Result<(), ValidationError> {
    match ProjectStatus::try_from(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("project_status")),
    }
}
