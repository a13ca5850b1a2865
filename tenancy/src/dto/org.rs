use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub settings: Value,
    pub created_at: String,
    pub updated_at: String,
}

impl OrgDto {
    /// Public handle derived from the slug, ie: `@zoada-labs`
    pub fn handle(&self) -> String {
        format!("@{}", self.slug)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgStatsDto {
    pub member_count: i64,
    pub project_count: i64,
    pub active_project_count: i64,
    pub event_count: i64,
}
