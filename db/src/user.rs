use async_trait::async_trait;

use chrono::{DateTime, Utc};
use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use diesel::{QueryDsl, SelectableHelper};
use serde_json::Value;
use snafu::ResultExt;
use uuid::Uuid;

use crate::Result;
use crate::error::{DbInteractSnafu, DbPoolSnafu, DbQuerySnafu};
use crate::schema::users::dsl;
use tenancy::dto::UserDto;
use tenancy::utils::datetime_to_str;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id.to_string(),
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            metadata: user.metadata,
            created_at: datetime_to_str(user.created_at),
            updated_at: datetime_to_str(user.updated_at),
        }
    }
}

/// Read access to user profiles.
///
/// Profiles are created by the identity backend when an account signs up,
/// the application only reads them.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<UserDto>>;
}

pub struct UserRepo {
    db_pool: Pool,
}

impl UserRepo {
    pub fn new(db_pool: Pool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn get(&self, id: Uuid) -> Result<Option<UserDto>> {
        let db = self.db_pool.get().await.context(DbPoolSnafu)?;

        let select_res = db
            .interact(move |conn| {
                dsl::users
                    .find(id)
                    .select(User::as_select())
                    .first::<User>(conn)
                    .optional()
            })
            .await
            .context(DbInteractSnafu)?;

        let user = select_res.context(DbQuerySnafu {
            table: "users".to_string(),
        })?;

        Ok(user.map(|x| x.into()))
    }
}

#[cfg(feature = "test")]
pub const TEST_USER_ID: Uuid = Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_1000);

/// Has a profile but belongs to no organization
#[cfg(feature = "test")]
pub const TEST_LONELY_USER_ID: Uuid = Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_1001);

#[cfg(feature = "test")]
pub fn create_test_user() -> User {
    use crate::db::test_timestamp;

    User {
        id: TEST_USER_ID,
        email: "jorge@example.com".to_string(),
        full_name: Some("Jorge Ledezma".to_string()),
        avatar_url: None,
        metadata: serde_json::json!({}),
        created_at: test_timestamp(0),
        updated_at: test_timestamp(0),
    }
}

#[cfg(feature = "test")]
pub fn create_test_lonely_user() -> User {
    use crate::db::test_timestamp;

    User {
        id: TEST_LONELY_USER_ID,
        email: "lonely@example.com".to_string(),
        full_name: None,
        avatar_url: None,
        metadata: serde_json::json!({}),
        created_at: test_timestamp(3600),
        updated_at: test_timestamp(3600),
    }
}

#[cfg(feature = "test")]
pub struct UserTestRepo {}

#[cfg(feature = "test")]
#[async_trait]
impl UserStore for UserTestRepo {
    async fn get(&self, id: Uuid) -> Result<Option<UserDto>> {
        let users = vec![create_test_user(), create_test_lonely_user()];
        let found = users.into_iter().find(|x| x.id == id);
        Ok(found.map(|x| x.into()))
    }
}
