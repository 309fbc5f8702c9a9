//! The closed set of monitored project categories.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What kind of target a project is, which decides its probe strategy.
///
/// Stored in the database as lowercase text (`frontend`, `api`,
/// `database`); anything else is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    /// A deployed web frontend checked with a browser-like GET.
    Frontend,
    /// A JSON API checked for an exact 200 with a body.
    Api,
    /// A database-backed service checked via its REST RPC endpoint.
    Database,
}

impl ProjectCategory {
    /// All categories, in the order the dashboard displays them.
    pub const ALL: [ProjectCategory; 3] = [
        ProjectCategory::Frontend,
        ProjectCategory::Api,
        ProjectCategory::Database,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Frontend => "frontend",
            ProjectCategory::Api => "api",
            ProjectCategory::Database => "database",
        }
    }
}

impl std::fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend" => Ok(ProjectCategory::Frontend),
            "api" => Ok(ProjectCategory::Api),
            "database" => Ok(ProjectCategory::Database),
            other => Err(CoreError::Validation(format!(
                "Invalid project category: '{other}' (expected frontend, api, or database)"
            ))),
        }
    }
}

/// Needed so `sqlx::FromRow` can decode the TEXT column via
/// `#[sqlx(try_from = "String")]` without this crate depending on sqlx.
impl TryFrom<String> for ProjectCategory {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!(
            "frontend".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::Frontend
        );
        assert_eq!(
            "api".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::Api
        );
        assert_eq!(
            "database".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::Database
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "supabase".parse::<ProjectCategory>().unwrap_err();
        assert!(err.to_string().contains("Invalid project category"));
    }

    #[test]
    fn test_round_trips_through_as_str() {
        for category in ProjectCategory::ALL {
            assert_eq!(category.as_str().parse::<ProjectCategory>().unwrap(), category);
        }
    }
}
