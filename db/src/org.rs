use async_trait::async_trait;

use chrono::{DateTime, Utc};
use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use serde_json::Value;
use snafu::ResultExt;
use uuid::Uuid;

use crate::Result;
use crate::error::{DbInteractSnafu, DbPoolSnafu, DbQuerySnafu};
use crate::schema::{events, memberships, projects};
use tenancy::dto::{OrgDto, OrgStatsDto, ProjectStatus};
use tenancy::utils::datetime_to_str;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Org {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Org> for OrgDto {
    fn from(org: Org) -> Self {
        OrgDto {
            id: org.id.to_string(),
            name: org.name,
            slug: org.slug,
            settings: org.settings,
            created_at: datetime_to_str(org.created_at),
            updated_at: datetime_to_str(org.updated_at),
        }
    }
}

#[async_trait]
pub trait OrgStore: Send + Sync {
    /// Counts of members, live projects, active projects and events.
    ///
    /// Deleted projects are not counted in `project_count`.
    async fn stats(&self, org_id: Uuid) -> Result<OrgStatsDto>;
}

pub struct OrgRepo {
    db_pool: Pool,
}

impl OrgRepo {
    pub fn new(db_pool: Pool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrgStore for OrgRepo {
    async fn stats(&self, org_id: Uuid) -> Result<OrgStatsDto> {
        let db = self.db_pool.get().await.context(DbPoolSnafu)?;

        let select_res = db
            .interact(move |conn| {
                let member_count = memberships::table
                    .filter(memberships::organization_id.eq(org_id))
                    .count()
                    .get_result::<i64>(conn)?;

                let project_count = projects::table
                    .filter(projects::organization_id.eq(org_id))
                    .filter(projects::status.ne(ProjectStatus::Deleted.as_str()))
                    .count()
                    .get_result::<i64>(conn)?;

                let active_project_count = projects::table
                    .filter(projects::organization_id.eq(org_id))
                    .filter(projects::status.eq(ProjectStatus::Active.as_str()))
                    .count()
                    .get_result::<i64>(conn)?;

                let event_count = events::table
                    .filter(events::organization_id.eq(org_id))
                    .count()
                    .get_result::<i64>(conn)?;

                Ok::<OrgStatsDto, diesel::result::Error>(OrgStatsDto {
                    member_count,
                    project_count,
                    active_project_count,
                    event_count,
                })
            })
            .await
            .context(DbInteractSnafu)?;

        let stats = select_res.context(DbQuerySnafu {
            table: "organizations".to_string(),
        })?;

        Ok(stats)
    }
}

#[cfg(feature = "test")]
pub const TEST_ORG_ID: Uuid = Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_2000);

/// The test user is only a viewer here
#[cfg(feature = "test")]
pub const TEST_VIEWER_ORG_ID: Uuid = Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_2001);

/// Nobody from the test users belongs here
#[cfg(feature = "test")]
pub const TEST_OTHER_ORG_ID: Uuid = Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_2002);

#[cfg(feature = "test")]
pub fn create_test_orgs() -> Vec<Org> {
    use crate::db::test_timestamp;

    let org = |id: Uuid, name: &str, slug: &str| Org {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        settings: serde_json::json!({}),
        created_at: test_timestamp(0),
        updated_at: test_timestamp(0),
    };

    vec![
        org(TEST_ORG_ID, "Zoada Labs", "zoada-labs"),
        org(TEST_VIEWER_ORG_ID, "Acme Corp", "acme-corp"),
        org(TEST_OTHER_ORG_ID, "Hidden Inc", "hidden-inc"),
    ]
}

#[cfg(feature = "test")]
pub fn create_test_org() -> Org {
    let mut orgs = create_test_orgs();
    orgs.swap_remove(0)
}

#[cfg(feature = "test")]
pub struct OrgTestRepo {}

#[cfg(feature = "test")]
#[async_trait]
impl OrgStore for OrgTestRepo {
    async fn stats(&self, org_id: Uuid) -> Result<OrgStatsDto> {
        use crate::event::create_test_events;
        use crate::membership::create_test_memberships;
        use crate::project::create_test_projects;

        let member_count = create_test_memberships()
            .iter()
            .filter(|x| x.organization_id == org_id)
            .count() as i64;

        let projects: Vec<_> = create_test_projects()
            .into_iter()
            .filter(|x| x.organization_id == org_id)
            .collect();
        let project_count = projects
            .iter()
            .filter(|x| x.status != ProjectStatus::Deleted.as_str())
            .count() as i64;
        let active_project_count = projects
            .iter()
            .filter(|x| x.status == ProjectStatus::Active.as_str())
            .count() as i64;

        let event_count = create_test_events()
            .iter()
            .filter(|x| x.organization_id == org_id)
            .count() as i64;

        Ok(OrgStatsDto {
            member_count,
            project_count,
            active_project_count,
            event_count,
        })
    }
}
