use tracing::warn;
use uuid::Uuid;

use crate::{Result, models::DashboardView, run::AppState};
use tenancy::actor::ActorDto;

pub async fn load_dashboard(state: &AppState, actor: &ActorDto) -> Result<DashboardView> {
    let Ok(user_id) = Uuid::parse_str(&actor.id) else {
        warn!("Signed in user has a malformed id: {}", actor.id);
        return Ok(DashboardView::new(None, &[]));
    };

    let profile = state.db.users.get(user_id).await?;
    let memberships = state.db.memberships.list_by_user(user_id).await?;

    // Only rows that belong to the caller are shown
    let own_id = user_id.to_string();
    let memberships: Vec<_> = memberships
        .into_iter()
        .filter(|m| m.membership.user_id == own_id)
        .collect();

    Ok(DashboardView::new(profile.as_ref(), &memberships))
}
