use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Membership role within an organization, from most to least privileged.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Member,
    Viewer,
}

#[derive(Debug, Snafu)]
#[snafu(display("Invalid role: {role}"))]
pub struct InvalidRoleError {
    role: String,
}

impl Role {
    /// All roles in ascending order of privilege
    pub const ASCENDING: [Role; 4] = [Role::Viewer, Role::Member, Role::Admin, Role::Owner];

    pub fn rank(&self) -> u8 {
        match self {
            Role::Owner => 3,
            Role::Admin => 2,
            Role::Member => 1,
            Role::Viewer => 0,
        }
    }

    /// True when this role is `min_role` or more privileged
    pub fn is_at_least(&self, min_role: Role) -> bool {
        self.rank() >= min_role.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Viewer => "viewer",
        }
    }

    pub fn badge_color(&self) -> BadgeColor {
        badge_color(self.as_str())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl TryFrom<&str> for Role {
    type Error = InvalidRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            "viewer" => Ok(Role::Viewer),
            _ => Err(InvalidRoleError {
                role: value.to_string(),
            }),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color of the role badge shown next to an organization
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BadgeColor {
    Primary,
    Secondary,
    Success,
    Default,
}

impl BadgeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeColor::Primary => "primary",
            BadgeColor::Secondary => "secondary",
            BadgeColor::Success => "success",
            BadgeColor::Default => "default",
        }
    }
}

impl core::fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps a raw role label to its badge color, unknown labels get the default color
pub fn badge_color(role: &str) -> BadgeColor {
    match role {
        "owner" => BadgeColor::Primary,
        "admin" => BadgeColor::Secondary,
        "member" => BadgeColor::Success,
        _ => BadgeColor::Default,
    }
}
