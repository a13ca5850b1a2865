use core::result::Result;
use validator::ValidationError;

use crate::health::{OK_STATUS, SERVICE_NAME};

fn literal(value: &str, expected: &'static str) -> Result<(), ValidationError> {
    if value == expected {
        return Ok(());
    }

    let mut err = ValidationError::new("literal");
    err.add_param("expected".into(), &expected);
    Err(err)
}

pub fn ok_status(value: &str) -> Result<(), ValidationError> {
    literal(value, OK_STATUS)
}

pub fn service_name(value: &str) -> Result<(), ValidationError> {
    literal(value, SERVICE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_status() {
        assert!(ok_status("ok").is_ok());
        assert!(ok_status("OK").is_err());
        assert!(ok_status("").is_err());
    }

    #[test]
    fn test_service_name() {
        assert!(service_name("supabase-boilerplate").is_ok());
        assert!(service_name("supabase-boilerplate ").is_err());

        let err = service_name("other").unwrap_err();
        assert_eq!(err.code, "literal");
        assert!(err.params.contains_key("expected"));
    }
}
