use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application profile mirroring an identity provider account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub metadata: Value,
    pub created_at: String,
    pub updated_at: String,
}
