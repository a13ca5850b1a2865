use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::Snafu;
use validator::Validate;

use crate::validators;

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Active,
    Archived,
    Deleted,
}

#[derive(Debug, Snafu)]
#[snafu(display("Invalid project status: {status}"))]
pub struct InvalidProjectStatusError {
    status: String,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Draft,
        ProjectStatus::Active,
        ProjectStatus::Archived,
        ProjectStatus::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Active => "active",
            ProjectStatus::Archived => "archived",
            ProjectStatus::Deleted => "deleted",
        }
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = InvalidProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(ProjectStatus::Draft),
            "active" => Ok(ProjectStatus::Active),
            "archived" => Ok(ProjectStatus::Archived),
            "deleted" => Ok(ProjectStatus::Deleted),
            _ => Err(InvalidProjectStatusError {
                status: value.to_string(),
            }),
        }
    }
}

impl core::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decides which project status changes are allowed.
///
/// No transition graph has been agreed on yet, so the only shipped policy is
/// [`Unrestricted`]. Plug a stricter policy in here once the rules exist.
pub trait StatusTransitions {
    fn allows(&self, from: ProjectStatus, to: ProjectStatus) -> bool;
}

/// Allows every transition
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl StatusTransitions for Unrestricted {
    fn allows(&self, _from: ProjectStatus, _to: ProjectStatus) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: String,
    pub settings: Value,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchProjectsParamsDto {
    #[validate(length(min = 0, max = 100))]
    pub q: Option<String>,

    #[validate(custom(function = "validators::project_status"))]
    pub status: Option<String>,
}

impl SearchProjectsParamsDto {
    /// Trimmed search keyword, `None` when blank
    pub fn keyword(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
    }

    /// Only call after validation
    pub fn status(&self) -> Option<ProjectStatus> {
        self.status
            .as_deref()
            .and_then(|s| ProjectStatus::try_from(s).ok())
    }
}
