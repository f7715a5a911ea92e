//! Simulated Scrum roles and what each may do

use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// The persona the user is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    ProductOwner,
    ScrumMaster,
    #[default]
    Developer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::ProductOwner, Role::ScrumMaster, Role::Developer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductOwner => "product-owner",
            Self::ScrumMaster => "scrum-master",
            Self::Developer => "developer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ProductOwner => "Product Owner",
            Self::ScrumMaster => "Scrum Master",
            Self::Developer => "Developer",
        }
    }

    /// Tutorial blurb for the role
    pub fn description(&self) -> &'static str {
        match self {
            Self::ProductOwner => {
                "The Product Owner maximizes the value of the product. They manage the Product Backlog \
                 and make sure everyone understands the priorities."
            }
            Self::ScrumMaster => {
                "The Scrum Master facilitates Scrum events and removes impediments for the team. \
                 They help everyone understand Scrum theory, practices and rules."
            }
            Self::Developer => {
                "The Developers deliver a \"Done\" increment of the product at the end of each Sprint, \
                 organizing their own work."
            }
        }
    }

    /// Whether a task card in `status` offers editing to this role
    pub fn can_edit_task(&self, status: TaskStatus) -> bool {
        match self {
            Self::ProductOwner => status == TaskStatus::ProductBacklog,
            Self::ScrumMaster => true,
            Self::Developer => status.is_board(),
        }
    }

    /// Adding to and removing from the product backlog
    pub fn can_manage_backlog(&self) -> bool {
        match self {
            Self::ProductOwner | Self::ScrumMaster => true,
            Self::Developer => false,
        }
    }

    /// Creating, activating and deleting sprints
    pub fn can_manage_sprints(&self) -> bool {
        match self {
            Self::ProductOwner | Self::ScrumMaster => true,
            Self::Developer => false,
        }
    }

    /// Adding cards straight onto the board
    pub fn can_add_board_tasks(&self, has_active_sprint: bool) -> bool {
        match self {
            Self::ProductOwner | Self::ScrumMaster => true,
            Self::Developer => has_active_sprint,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "product-owner" | "po" => Ok(Self::ProductOwner),
            "scrum-master" | "sm" => Ok(Self::ScrumMaster),
            "developer" | "dev" => Ok(Self::Developer),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}
