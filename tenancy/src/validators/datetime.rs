use chrono::NaiveDateTime;
use core::result::Result;
use validator::ValidationError;

/// UTC only, `T` separator and a trailing `Z`, fractional seconds optional
const UTC_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Accepts ISO-8601 UTC datetimes, ie: `2024-01-15T10:00:00.000Z`
pub fn datetime(value: &str) -> Result<(), ValidationError> {
    // Offsets, lowercase markers and space separators are all rejected
    if value.len() < 20 || value.as_bytes()[10] != b'T' || !value.ends_with('Z') {
        return Err(ValidationError::new("datetime"));
    }

    match NaiveDateTime::parse_from_str(value, UTC_DATETIME_FORMAT) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("datetime")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_datetime() {
        let today = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        assert!(datetime(&today).is_ok());
        assert!(datetime("2024-01-15T10:00:00.000Z").is_ok());
        assert!(datetime("2024-01-15T10:00:00Z").is_ok());
        assert!(datetime("2024-01-15T10:00:00.123456Z").is_ok());
        assert!(datetime("2025-01-01").is_err());
        assert!(datetime("yesterday").is_err());
        assert!(datetime("").is_err());
    }

    #[test]
    fn test_datetime_requires_utc_marker() {
        assert!(datetime("2024-01-15T10:00:00+08:00").is_err());
        assert!(datetime("2024-01-15T10:00:00.000+00:00").is_err());
        assert!(datetime("2024-01-15 10:00:00Z").is_err());
        assert!(datetime("2024-01-15t10:00:00z").is_err());
        assert!(datetime("2024-01-15T10:00:00z").is_err());
        assert!(datetime("2024-01-15T10:00:00").is_err());
        assert!(datetime("2024-13-15T10:00:00Z").is_err());
    }
}
