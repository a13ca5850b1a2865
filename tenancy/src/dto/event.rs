use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Audit trail entry, never updated or deleted once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDto {
    pub id: String,
    pub organization_id: String,
    pub user_id: Option<String>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub metadata: Value,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListEventsParamsDto {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl ListEventsParamsDto {
    pub const DEFAULT_LIMIT: i64 = 20;

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}
