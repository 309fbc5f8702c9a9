//! Probe domain types: what to check, and what a check produced.

use serde::{Deserialize, Serialize};

use crate::category::ProjectCategory;
use crate::error::CoreError;
use crate::types::DbId;

/// Terminal state of a single liveness check.
///
/// A probe has exactly two outcomes; failures, timeouts, and unmet
/// preconditions all classify as [`ProbeStatus::Inactive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeStatus {
    Active,
    Inactive,
}

impl ProbeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStatus::Active => "Active",
            ProbeStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one probe strategy needs, and nothing more.
///
/// Constructed fallibly from a project row via [`ProbeSpec::from_parts`]
/// so missing credentials surface once, at the dispatch site, instead of
/// being re-checked ad hoc inside each strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeSpec {
    Frontend { health_check_url: String },
    Api { health_check_url: String },
    Database { db_url: String, db_key: String },
}

impl ProbeSpec {
    /// Build the spec for a project's category from its optional fields.
    pub fn from_parts(
        category: ProjectCategory,
        health_check_url: Option<&str>,
        db_url: Option<&str>,
        db_key: Option<&str>,
    ) -> Result<Self, CoreError> {
        match category {
            ProjectCategory::Frontend => {
                let url = health_check_url.ok_or_else(|| {
                    CoreError::Validation("Missing health check URL for frontend project".into())
                })?;
                Ok(ProbeSpec::Frontend {
                    health_check_url: url.to_string(),
                })
            }
            ProjectCategory::Api => {
                let url = health_check_url.ok_or_else(|| {
                    CoreError::Validation("Missing health check URL for API project".into())
                })?;
                Ok(ProbeSpec::Api {
                    health_check_url: url.to_string(),
                })
            }
            ProjectCategory::Database => match (db_url, db_key) {
                (Some(url), Some(key)) => Ok(ProbeSpec::Database {
                    db_url: url.trim_end_matches('/').to_string(),
                    db_key: key.to_string(),
                }),
                _ => Err(CoreError::Validation(
                    "Missing database credentials for database project".into(),
                )),
            },
        }
    }
}

/// One normalized observation for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub project_id: DbId,
    pub name: String,
    pub status: ProbeStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_history_strings() {
        assert_eq!(ProbeStatus::Active.to_string(), "Active");
        assert_eq!(ProbeStatus::Inactive.to_string(), "Inactive");
    }

    #[test]
    fn test_frontend_spec_requires_health_check_url() {
        let err =
            ProbeSpec::from_parts(ProjectCategory::Frontend, None, None, None).unwrap_err();
        assert!(err.to_string().contains("health check URL"));

        let spec = ProbeSpec::from_parts(
            ProjectCategory::Frontend,
            Some("https://example.com/health"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(
            spec,
            ProbeSpec::Frontend {
                health_check_url: "https://example.com/health".into()
            }
        );
    }

    #[test]
    fn test_database_spec_requires_both_credentials() {
        let err = ProbeSpec::from_parts(
            ProjectCategory::Database,
            None,
            Some("https://db.example.com"),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("database credentials"));
    }

    #[test]
    fn test_database_spec_strips_trailing_slash() {
        let spec = ProbeSpec::from_parts(
            ProjectCategory::Database,
            None,
            Some("https://db.example.com/"),
            Some("service-key"),
        )
        .unwrap();
        assert_eq!(
            spec,
            ProbeSpec::Database {
                db_url: "https://db.example.com".into(),
                db_key: "service-key".into()
            }
        );
    }
}
