use async_trait::async_trait;

use chrono::{DateTime, Utc};
use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use diesel::{QueryDsl, SelectableHelper};
use serde_json::Value;
use snafu::ResultExt;
use uuid::Uuid;

use crate::Result;
use crate::error::{DbInteractSnafu, DbPoolSnafu, DbQuerySnafu, InvalidProjectStatusSnafu};
use crate::schema::projects::{self, dsl};
use tenancy::dto::{InvalidProjectStatusError, ProjectDto, ProjectStatus};
use tenancy::utils::datetime_to_str;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub owner_id: Uuid,
    pub settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Project> for ProjectDto {
    type Error = InvalidProjectStatusError;

    fn try_from(project: Project) -> std::result::Result<Self, Self::Error> {
        let status = ProjectStatus::try_from(project.status.as_str())?;

        Ok(ProjectDto {
            id: project.id.to_string(),
            organization_id: project.organization_id.to_string(),
            name: project.name,
            description: project.description,
            status,
            owner_id: project.owner_id.to_string(),
            settings: project.settings,
            created_at: datetime_to_str(project.created_at),
            updated_at: datetime_to_str(project.updated_at),
        })
    }
}

/// Escapes LIKE wildcards so the keyword matches literally
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Projects of the organization, most recently updated first.
    ///
    /// `keyword` matches name or description case-insensitively. Without a
    /// `status` filter, deleted projects are left out.
    async fn search(
        &self,
        org_id: Uuid,
        keyword: Option<String>,
        status: Option<ProjectStatus>,
        limit: i64,
    ) -> Result<Vec<ProjectDto>>;
}

pub struct ProjectRepo {
    db_pool: Pool,
}

impl ProjectRepo {
    pub fn new(db_pool: Pool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ProjectStore for ProjectRepo {
    async fn search(
        &self,
        org_id: Uuid,
        keyword: Option<String>,
        status: Option<ProjectStatus>,
        limit: i64,
    ) -> Result<Vec<ProjectDto>> {
        let db = self.db_pool.get().await.context(DbPoolSnafu)?;

        let select_res = db
            .interact(move |conn| {
                let mut query = projects::table
                    .filter(dsl::organization_id.eq(org_id))
                    .into_boxed();

                query = match status {
                    Some(status) => query.filter(dsl::status.eq(status.as_str())),
                    None => query.filter(dsl::status.ne(ProjectStatus::Deleted.as_str())),
                };

                if let Some(keyword) = keyword {
                    let pattern = like_pattern(&keyword);
                    query = query.filter(
                        dsl::name
                            .ilike(pattern.clone())
                            .or(dsl::description.ilike(pattern)),
                    );
                }

                query
                    .select(Project::as_select())
                    .order(dsl::updated_at.desc())
                    .limit(limit)
                    .load::<Project>(conn)
            })
            .await
            .context(DbInteractSnafu)?;

        let items = select_res.context(DbQuerySnafu {
            table: "projects".to_string(),
        })?;

        let items = items
            .into_iter()
            .map(ProjectDto::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .context(InvalidProjectStatusSnafu {
                table: "projects".to_string(),
            })?;

        Ok(items)
    }
}

#[cfg(feature = "test")]
pub fn create_test_projects() -> Vec<Project> {
    use crate::db::test_timestamp;
    use crate::org::{TEST_ORG_ID, TEST_OTHER_ORG_ID};
    use crate::user::TEST_USER_ID;

    let project = |n: u128, org_id: Uuid, name: &str, description: Option<&str>, status: &str| {
        Project {
            id: Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_4000 + n),
            organization_id: org_id,
            name: name.to_string(),
            description: description.map(|x| x.to_string()),
            status: status.to_string(),
            owner_id: TEST_USER_ID,
            settings: serde_json::json!({}),
            created_at: test_timestamp(0),
            updated_at: test_timestamp(600 * n as i64),
        }
    };

    vec![
        project(0, TEST_ORG_ID, "Roadmap", Some("Plans for 2024"), "active"),
        project(1, TEST_ORG_ID, "Website redesign", None, "draft"),
        project(2, TEST_ORG_ID, "Old site", Some("Replaced by the redesign"), "deleted"),
        project(3, TEST_OTHER_ORG_ID, "Secret", None, "active"),
    ]
}

#[cfg(feature = "test")]
pub struct ProjectTestRepo {}

#[cfg(feature = "test")]
#[async_trait]
impl ProjectStore for ProjectTestRepo {
    async fn search(
        &self,
        org_id: Uuid,
        keyword: Option<String>,
        status: Option<ProjectStatus>,
        limit: i64,
    ) -> Result<Vec<ProjectDto>> {
        let keyword = keyword.map(|x| x.to_lowercase());
        let mut items: Vec<Project> = create_test_projects()
            .into_iter()
            .filter(|x| x.organization_id == org_id)
            .filter(|x| match status {
                Some(status) => x.status == status.as_str(),
                None => x.status != ProjectStatus::Deleted.as_str(),
            })
            .filter(|x| match &keyword {
                Some(k) => {
                    x.name.to_lowercase().contains(k)
                        || x
                            .description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(k))
                }
                None => true,
            })
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items.truncate(limit.max(0) as usize);

        items
            .into_iter()
            .map(ProjectDto::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .context(InvalidProjectStatusSnafu {
                table: "projects".to_string(),
            })
    }
}
