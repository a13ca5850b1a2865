use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use snafu::ResultExt;

use crate::{
    Result,
    ctx::Ctx,
    error::QueryRejectionSnafu,
    run::AppState,
    services::orgs::{list_events_svc, org_stats_svc, search_projects_svc},
};
use tenancy::dto::{
    EventDto, ListEventsParamsDto, OrgStatsDto, ProjectDto, SearchProjectsParamsDto,
};

#[derive(Deserialize)]
pub struct OrgParams {
    pub org_id: String,
}

pub async fn org_stats_handler(
    Extension(ctx): Extension<Ctx>,
    State(state): State<AppState>,
    Path(params): Path<OrgParams>,
) -> Result<Json<OrgStatsDto>> {
    let stats = org_stats_svc(&state, &ctx, &params.org_id).await?;
    Ok(Json(stats))
}

pub async fn search_projects_handler(
    Extension(ctx): Extension<Ctx>,
    State(state): State<AppState>,
    Path(params): Path<OrgParams>,
    query: core::result::Result<Query<SearchProjectsParamsDto>, QueryRejection>,
) -> Result<Json<Vec<ProjectDto>>> {
    let Query(query) = query.context(QueryRejectionSnafu {
        msg: "Invalid query parameters".to_string(),
    })?;

    let projects = search_projects_svc(&state, &ctx, &params.org_id, &query).await?;
    Ok(Json(projects))
}

pub async fn list_events_handler(
    Extension(ctx): Extension<Ctx>,
    State(state): State<AppState>,
    Path(params): Path<OrgParams>,
    query: core::result::Result<Query<ListEventsParamsDto>, QueryRejection>,
) -> Result<Json<Vec<EventDto>>> {
    let Query(query) = query.context(QueryRejectionSnafu {
        msg: "Invalid query parameters".to_string(),
    })?;

    let events = list_events_svc(&state, &ctx, &params.org_id, &query).await?;
    Ok(Json(events))
}
