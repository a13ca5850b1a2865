use chrono::{DateTime, Utc};

pub fn datetime_now_str() -> String {
    datetime_to_str(Utc::now())
}

pub fn str_to_datetime(date_str: &str) -> Result<DateTime<Utc>, String> {
    match date_str.parse::<DateTime<Utc>>() {
        Ok(date) => Ok(date),
        Err(_) => Err(format!("Invalid date string: {}", date_str)),
    }
}

pub fn datetime_to_str(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Calendar date for display, ie: `2024-01-15`. Blank when unparseable.
pub fn display_date(date_str: &str) -> String {
    match str_to_datetime(date_str) {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => String::new(),
    }
}
