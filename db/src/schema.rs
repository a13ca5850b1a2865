// Mirrors the tenant tables. Role and status columns are plain varchar
// holding the lowercase labels.

diesel::table! {
    organizations (id) {
        id -> Uuid,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 100]
        slug -> Varchar,
        settings -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        #[max_length = 250]
        email -> Varchar,
        #[max_length = 100]
        full_name -> Nullable<Varchar>,
        avatar_url -> Nullable<Text>,
        metadata -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    memberships (id) {
        id -> Uuid,
        organization_id -> Uuid,
        user_id -> Uuid,
        #[max_length = 10]
        role -> Varchar,
        invited_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    projects (id) {
        id -> Uuid,
        organization_id -> Uuid,
        #[max_length = 200]
        name -> Varchar,
        description -> Nullable<Text>,
        #[max_length = 10]
        status -> Varchar,
        owner_id -> Uuid,
        settings -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    events (id) {
        id -> Uuid,
        organization_id -> Uuid,
        user_id -> Nullable<Uuid>,
        #[max_length = 100]
        event_type -> Varchar,
        #[max_length = 100]
        entity_type -> Varchar,
        entity_id -> Nullable<Uuid>,
        metadata -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(memberships -> organizations (organization_id));
diesel::joinable!(projects -> organizations (organization_id));
diesel::joinable!(events -> organizations (organization_id));

diesel::allow_tables_to_appear_in_same_query!(
    organizations,
    users,
    memberships,
    projects,
    events,
);
