use validator::Validate;

use crate::{Error, Result, ctx::Ctx, run::AppState, services::access::authorize_org};
use tenancy::dto::{
    EventDto, ListEventsParamsDto, OrgStatsDto, ProjectDto, SearchProjectsParamsDto,
};
use tenancy::role::Role;
use tenancy::validators::flatten_errors;

pub const MAX_PROJECT_RESULTS: i64 = 50;

pub async fn org_stats_svc(state: &AppState, ctx: &Ctx, org_id: &str) -> Result<OrgStatsDto> {
    let access = authorize_org(state, ctx, org_id, Role::Viewer).await?;
    let stats = state.db.orgs.stats(access.org_id).await?;
    Ok(stats)
}

pub async fn search_projects_svc(
    state: &AppState,
    ctx: &Ctx,
    org_id: &str,
    params: &SearchProjectsParamsDto,
) -> Result<Vec<ProjectDto>> {
    let access = authorize_org(state, ctx, org_id, Role::Viewer).await?;

    if let Err(errors) = params.validate() {
        return Err(Error::Validation {
            msg: flatten_errors(&errors),
        });
    }

    let projects = state
        .db
        .projects
        .search(
            access.org_id,
            params.keyword(),
            params.status(),
            MAX_PROJECT_RESULTS,
        )
        .await?;

    Ok(projects)
}

pub async fn list_events_svc(
    state: &AppState,
    ctx: &Ctx,
    org_id: &str,
    params: &ListEventsParamsDto,
) -> Result<Vec<EventDto>> {
    let access = authorize_org(state, ctx, org_id, Role::Admin).await?;

    if let Err(errors) = params.validate() {
        return Err(Error::Validation {
            msg: flatten_errors(&errors),
        });
    }

    let events = state.db.events.list(access.org_id, params.limit()).await?;
    Ok(events)
}
