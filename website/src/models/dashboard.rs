use tenancy::dto::{MembershipWithOrgDto, UserDto};
use tenancy::role::BadgeColor;
use tenancy::utils::display_date;

pub const NO_ORGS_MESSAGE: &str = "You are not a member of any organizations yet";

const DEFAULT_DISPLAY_NAME: &str = "User";

/// One organization card on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct OrgCard {
    pub name: String,
    pub handle: String,
    pub role: String,
    pub badge: BadgeColor,
}

impl From<&MembershipWithOrgDto> for OrgCard {
    fn from(m: &MembershipWithOrgDto) -> Self {
        OrgCard {
            name: m.organization.name.clone(),
            handle: m.organization.handle(),
            role: m.membership.role.to_string(),
            badge: m.membership.role.badge_color(),
        }
    }
}

/// Everything the dashboard page shows.
///
/// A missing profile is not an error, the page falls back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub avatar_label: String,
    pub member_since: String,
    pub orgs: Vec<OrgCard>,
}

impl DashboardView {
    pub fn new(user: Option<&UserDto>, memberships: &[MembershipWithOrgDto]) -> Self {
        let full_name = user
            .and_then(|u| u.full_name.as_deref())
            .filter(|n| !n.is_empty());
        let email = user.map(|u| u.email.clone()).unwrap_or_default();

        let avatar_label = match full_name {
            Some(name) => name.to_string(),
            None if !email.is_empty() => email.clone(),
            None => DEFAULT_DISPLAY_NAME.to_string(),
        };

        DashboardView {
            display_name: full_name.unwrap_or(DEFAULT_DISPLAY_NAME).to_string(),
            email,
            avatar_url: user.and_then(|u| u.avatar_url.clone()),
            avatar_label,
            member_since: user
                .map(|u| display_date(&u.created_at))
                .unwrap_or_default(),
            orgs: memberships.iter().map(OrgCard::from).collect(),
        }
    }

    pub fn org_count(&self) -> usize {
        self.orgs.len()
    }

    /// Shown instead of the organization list when there is nothing to list
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.orgs.is_empty() {
            Some(NO_ORGS_MESSAGE)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tenancy::dto::{MembershipDto, OrgDto};
    use tenancy::role::Role;

    fn user() -> UserDto {
        UserDto {
            id: "user-123".to_string(),
            email: "jorge@example.com".to_string(),
            full_name: Some("Jorge Ledezma".to_string()),
            avatar_url: None,
            metadata: json!({}),
            created_at: "2024-01-15T10:00:00.000Z".to_string(),
            updated_at: "2024-01-15T10:00:00.000Z".to_string(),
        }
    }

    fn membership(role: Role) -> MembershipWithOrgDto {
        MembershipWithOrgDto {
            membership: MembershipDto {
                id: "membership-1".to_string(),
                organization_id: "org-1".to_string(),
                user_id: "user-123".to_string(),
                role,
                invited_by: None,
                created_at: "2024-01-15T10:00:00.000Z".to_string(),
                updated_at: "2024-01-15T10:00:00.000Z".to_string(),
            },
            organization: OrgDto {
                id: "org-1".to_string(),
                name: "Zoada Labs".to_string(),
                slug: "zoada-labs".to_string(),
                settings: json!({}),
                created_at: "2024-01-15T10:00:00.000Z".to_string(),
                updated_at: "2024-01-15T10:00:00.000Z".to_string(),
            },
        }
    }

    #[test]
    fn test_dashboard_with_memberships() {
        let u = user();
        let view = DashboardView::new(Some(&u), &[membership(Role::Owner)]);

        assert_eq!(view.display_name, "Jorge Ledezma");
        assert_eq!(view.email, "jorge@example.com");
        assert_eq!(view.member_since, "2024-01-15");
        assert_eq!(view.org_count(), 1);
        assert_eq!(view.empty_message(), None);
        assert_eq!(
            view.orgs[0],
            OrgCard {
                name: "Zoada Labs".to_string(),
                handle: "@zoada-labs".to_string(),
                role: "owner".to_string(),
                badge: BadgeColor::Primary,
            }
        );
    }

    #[test]
    fn test_dashboard_without_memberships() {
        let u = user();
        let view = DashboardView::new(Some(&u), &[]);
        assert_eq!(view.org_count(), 0);
        assert_eq!(
            view.empty_message(),
            Some("You are not a member of any organizations yet")
        );
    }

    #[test]
    fn test_dashboard_without_profile() {
        let view = DashboardView::new(None, &[]);
        assert_eq!(view.display_name, "User");
        assert_eq!(view.avatar_label, "User");
        assert_eq!(view.email, "");
        assert_eq!(view.member_since, "");
    }

    #[test]
    fn test_avatar_label_falls_back_to_email() {
        let mut u = user();
        u.full_name = None;
        let view = DashboardView::new(Some(&u), &[membership(Role::Viewer)]);
        assert_eq!(view.display_name, "User");
        assert_eq!(view.avatar_label, "jorge@example.com");
        assert_eq!(view.orgs[0].badge, BadgeColor::Default);
    }
}
