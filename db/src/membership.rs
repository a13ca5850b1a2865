use async_trait::async_trait;

use chrono::{DateTime, Utc};
use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use diesel::{QueryDsl, SelectableHelper};
use snafu::ResultExt;
use uuid::Uuid;

use crate::Result;
use crate::error::{DbInteractSnafu, DbPoolSnafu, DbQuerySnafu, InvalidRoleSnafu};
use crate::org::Org;
use crate::schema::{memberships, organizations};
use tenancy::dto::{MembershipDto, MembershipWithOrgDto};
use tenancy::role::{InvalidRoleError, Role};
use tenancy::utils::datetime_to_str;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::memberships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Membership {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub invited_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Membership> for MembershipDto {
    type Error = InvalidRoleError;

    fn try_from(membership: Membership) -> std::result::Result<Self, Self::Error> {
        let role = Role::try_from(membership.role.as_str())?;

        Ok(MembershipDto {
            id: membership.id.to_string(),
            organization_id: membership.organization_id.to_string(),
            user_id: membership.user_id.to_string(),
            role,
            invited_by: membership.invited_by.map(|x| x.to_string()),
            created_at: datetime_to_str(membership.created_at),
            updated_at: datetime_to_str(membership.updated_at),
        })
    }
}

fn to_membership_with_org(
    (membership, org): (Membership, Org),
) -> std::result::Result<MembershipWithOrgDto, InvalidRoleError> {
    Ok(MembershipWithOrgDto {
        membership: membership.try_into()?,
        organization: org.into(),
    })
}

#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Memberships of the user joined with their organizations, by organization name
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<MembershipWithOrgDto>>;

    /// Rows consulted by the access predicates.
    ///
    /// Callers must still match on user and organization themselves.
    async fn list_for_access(&self, user_id: Uuid, org_id: Uuid) -> Result<Vec<MembershipDto>>;
}

pub struct MembershipRepo {
    db_pool: Pool,
}

impl MembershipRepo {
    pub fn new(db_pool: Pool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MembershipStore for MembershipRepo {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<MembershipWithOrgDto>> {
        let db = self.db_pool.get().await.context(DbPoolSnafu)?;

        let select_res = db
            .interact(move |conn| {
                memberships::table
                    .inner_join(organizations::table)
                    .filter(memberships::user_id.eq(user_id))
                    .select((Membership::as_select(), Org::as_select()))
                    .order(organizations::name.asc())
                    .load::<(Membership, Org)>(conn)
            })
            .await
            .context(DbInteractSnafu)?;

        let items = select_res.context(DbQuerySnafu {
            table: "memberships".to_string(),
        })?;

        let items = items
            .into_iter()
            .map(to_membership_with_org)
            .collect::<std::result::Result<Vec<_>, _>>()
            .context(InvalidRoleSnafu {
                table: "memberships".to_string(),
            })?;

        Ok(items)
    }

    async fn list_for_access(&self, user_id: Uuid, org_id: Uuid) -> Result<Vec<MembershipDto>> {
        let db = self.db_pool.get().await.context(DbPoolSnafu)?;

        let select_res = db
            .interact(move |conn| {
                memberships::table
                    .filter(memberships::user_id.eq(user_id))
                    .filter(memberships::organization_id.eq(org_id))
                    .select(Membership::as_select())
                    .load::<Membership>(conn)
            })
            .await
            .context(DbInteractSnafu)?;

        let items = select_res.context(DbQuerySnafu {
            table: "memberships".to_string(),
        })?;

        let items = items
            .into_iter()
            .map(MembershipDto::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .context(InvalidRoleSnafu {
                table: "memberships".to_string(),
            })?;

        Ok(items)
    }
}

#[cfg(feature = "test")]
pub const TEST_MEMBERSHIP_ID: Uuid = Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_3000);

#[cfg(feature = "test")]
pub const TEST_VIEWER_MEMBERSHIP_ID: Uuid =
    Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_3001);

#[cfg(feature = "test")]
pub fn create_test_memberships() -> Vec<Membership> {
    use crate::db::test_timestamp;
    use crate::org::{TEST_ORG_ID, TEST_VIEWER_ORG_ID};
    use crate::user::TEST_USER_ID;

    vec![
        Membership {
            id: TEST_MEMBERSHIP_ID,
            organization_id: TEST_ORG_ID,
            user_id: TEST_USER_ID,
            role: "owner".to_string(),
            invited_by: None,
            created_at: test_timestamp(0),
            updated_at: test_timestamp(0),
        },
        Membership {
            id: TEST_VIEWER_MEMBERSHIP_ID,
            organization_id: TEST_VIEWER_ORG_ID,
            user_id: TEST_USER_ID,
            role: "viewer".to_string(),
            invited_by: None,
            created_at: test_timestamp(60),
            updated_at: test_timestamp(60),
        },
    ]
}

#[cfg(feature = "test")]
pub struct MembershipTestRepo {}

#[cfg(feature = "test")]
#[async_trait]
impl MembershipStore for MembershipTestRepo {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<MembershipWithOrgDto>> {
        use crate::org::create_test_orgs;

        let orgs = create_test_orgs();
        let mut items: Vec<(Membership, Org)> = create_test_memberships()
            .into_iter()
            .filter(|x| x.user_id == user_id)
            .filter_map(|x| {
                let org = orgs.iter().find(|o| o.id == x.organization_id)?.clone();
                Some((x, org))
            })
            .collect();
        items.sort_by(|a, b| a.1.name.cmp(&b.1.name));

        items
            .into_iter()
            .map(to_membership_with_org)
            .collect::<std::result::Result<Vec<_>, _>>()
            .context(InvalidRoleSnafu {
                table: "memberships".to_string(),
            })
    }

    async fn list_for_access(&self, user_id: Uuid, org_id: Uuid) -> Result<Vec<MembershipDto>> {
        create_test_memberships()
            .into_iter()
            .filter(|x| x.user_id == user_id && x.organization_id == org_id)
            .map(MembershipDto::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .context(InvalidRoleSnafu {
                table: "memberships".to_string(),
            })
    }
}
