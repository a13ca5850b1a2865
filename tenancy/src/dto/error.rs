use serde::{Deserialize, Serialize};

/// JSON error body returned by the `/api` routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessageDto {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}
