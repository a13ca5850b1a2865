use serde::{Deserialize, Serialize};

use super::OrgDto;
use crate::role::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipDto {
    pub id: String,
    pub organization_id: String,
    pub user_id: String,
    pub role: Role,
    pub invited_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Membership joined with the organization it grants access to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipWithOrgDto {
    #[serde(flatten)]
    pub membership: MembershipDto,
    pub organization: OrgDto,
}
