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
use crate::schema::events::dsl;
use tenancy::dto::EventDto;
use tenancy::utils::datetime_to_str;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Event {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub user_id: Option<Uuid>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        EventDto {
            id: event.id.to_string(),
            organization_id: event.organization_id.to_string(),
            user_id: event.user_id.map(|x| x.to_string()),
            event_type: event.event_type,
            entity_type: event.entity_type,
            entity_id: event.entity_id.map(|x| x.to_string()),
            metadata: event.metadata,
            created_at: datetime_to_str(event.created_at),
        }
    }
}

/// Audit trail reads. Events are written by the data backend and never
/// updated or deleted, so there is nothing else here.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Most recent events first
    async fn list(&self, org_id: Uuid, limit: i64) -> Result<Vec<EventDto>>;
}

pub struct EventRepo {
    db_pool: Pool,
}

impl EventRepo {
    pub fn new(db_pool: Pool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl EventStore for EventRepo {
    async fn list(&self, org_id: Uuid, limit: i64) -> Result<Vec<EventDto>> {
        let db = self.db_pool.get().await.context(DbPoolSnafu)?;

        let select_res = db
            .interact(move |conn| {
                dsl::events
                    .filter(dsl::organization_id.eq(org_id))
                    .select(Event::as_select())
                    .order(dsl::created_at.desc())
                    .limit(limit)
                    .load::<Event>(conn)
            })
            .await
            .context(DbInteractSnafu)?;

        let items = select_res.context(DbQuerySnafu {
            table: "events".to_string(),
        })?;

        Ok(items.into_iter().map(|x| x.into()).collect())
    }
}

#[cfg(feature = "test")]
pub fn create_test_events() -> Vec<Event> {
    use crate::db::test_timestamp;
    use crate::org::TEST_ORG_ID;
    use crate::user::TEST_USER_ID;

    vec![
        Event {
            id: Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_5000),
            organization_id: TEST_ORG_ID,
            user_id: Some(TEST_USER_ID),
            event_type: "organization.created".to_string(),
            entity_type: "organization".to_string(),
            entity_id: Some(TEST_ORG_ID),
            metadata: serde_json::json!({}),
            created_at: test_timestamp(0),
        },
        Event {
            id: Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_5001),
            organization_id: TEST_ORG_ID,
            user_id: Some(TEST_USER_ID),
            event_type: "project.created".to_string(),
            entity_type: "project".to_string(),
            entity_id: Some(Uuid::from_u128(0x0194_a000_0000_7000_8000_0000_0000_4000)),
            metadata: serde_json::json!({ "name": "Roadmap" }),
            created_at: test_timestamp(300),
        },
    ]
}

#[cfg(feature = "test")]
pub struct EventTestRepo {}

#[cfg(feature = "test")]
#[async_trait]
impl EventStore for EventTestRepo {
    async fn list(&self, org_id: Uuid, limit: i64) -> Result<Vec<EventDto>> {
        let mut items: Vec<Event> = create_test_events()
            .into_iter()
            .filter(|x| x.organization_id == org_id)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit.max(0) as usize);
        Ok(items.into_iter().map(|x| x.into()).collect())
    }
}
