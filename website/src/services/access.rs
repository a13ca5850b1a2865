use tracing::info;
use uuid::Uuid;

use crate::{Error, Result, ctx::Ctx, run::AppState};
use tenancy::access::{is_member, role_of};
use tenancy::role::Role;

/// Proof that the current actor may act on an organization
#[derive(Debug, Clone, PartialEq)]
pub struct OrgAccess {
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
}

fn not_a_member() -> Error {
    Error::Forbidden {
        msg: "You are not a member of this organization".to_string(),
    }
}

/// Loads the caller's memberships for the organization and checks `min_role`.
///
/// Unknown, malformed and foreign organizations all look the same to the
/// caller: forbidden.
pub async fn authorize_org(
    state: &AppState,
    ctx: &Ctx,
    org_id: &str,
    min_role: Role,
) -> Result<OrgAccess> {
    let Some(actor) = ctx.actor() else {
        return Err(Error::LoginRequired);
    };

    let (Ok(org_uuid), Ok(user_uuid)) = (Uuid::parse_str(org_id), Uuid::parse_str(&actor.id))
    else {
        return Err(not_a_member());
    };

    let memberships = state
        .db
        .memberships
        .list_for_access(user_uuid, org_uuid)
        .await?;

    // Rows are matched again here, the store is not trusted to filter them
    let user_id = user_uuid.to_string();
    let org_id = org_uuid.to_string();
    if !is_member(&memberships, &user_id, &org_id) {
        info!("Denied {} access to org {}: not a member", user_id, org_id);
        return Err(not_a_member());
    }

    match role_of(&memberships, &user_id, &org_id) {
        Some(role) if role.is_at_least(min_role) => Ok(OrgAccess {
            org_id: org_uuid,
            user_id: user_uuid,
            role,
        }),
        _ => {
            info!(
                "Denied {} access to org {}: requires {}",
                user_id, org_id, min_role
            );
            Err(Error::Forbidden {
                msg: format!("Requires {} role or higher", min_role),
            })
        }
    }
}
