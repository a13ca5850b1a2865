use deadpool_diesel::postgres::{Manager, Pool, Runtime};
use std::sync::Arc;

use crate::Result;
use crate::error::Error;
use crate::event::{EventRepo, EventStore};
use crate::membership::{MembershipRepo, MembershipStore};
use crate::org::{OrgRepo, OrgStore};
use crate::project::{ProjectRepo, ProjectStore};
use crate::user::{UserRepo, UserStore};

pub fn create_db_pool(database_url: &str) -> Result<Pool> {
    let manager = Manager::new(database_url, Runtime::Tokio1);
    Pool::builder(manager)
        .max_size(8)
        .build()
        .map_err(|e| Error::DbBuild { msg: e.to_string() })
}

pub struct DbMapper {
    pub events: Arc<dyn EventStore>,
    pub memberships: Arc<dyn MembershipStore>,
    pub orgs: Arc<dyn OrgStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub users: Arc<dyn UserStore>,
}

pub fn create_db_mapper(database_url: &str) -> Result<DbMapper> {
    let pool = create_db_pool(database_url)?;
    Ok(DbMapper {
        events: Arc::new(EventRepo::new(pool.clone())),
        memberships: Arc::new(MembershipRepo::new(pool.clone())),
        orgs: Arc::new(OrgRepo::new(pool.clone())),
        projects: Arc::new(ProjectRepo::new(pool.clone())),
        users: Arc::new(UserRepo::new(pool)),
    })
}

/// Mapper backed by the in-memory fixtures
#[cfg(feature = "test")]
pub fn create_test_db_mapper() -> DbMapper {
    use crate::event::EventTestRepo;
    use crate::membership::MembershipTestRepo;
    use crate::org::OrgTestRepo;
    use crate::project::ProjectTestRepo;
    use crate::user::UserTestRepo;

    DbMapper {
        events: Arc::new(EventTestRepo {}),
        memberships: Arc::new(MembershipTestRepo {}),
        orgs: Arc::new(OrgTestRepo {}),
        projects: Arc::new(ProjectTestRepo {}),
        users: Arc::new(UserTestRepo {}),
    }
}

/// Fixed fixture clock: 2024-01-15T10:00:00Z shifted by `offset_secs`
#[cfg(feature = "test")]
pub(crate) fn test_timestamp(offset_secs: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(1_705_312_800 + offset_secs, 0).unwrap_or_default()
}
