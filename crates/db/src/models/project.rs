//! Monitored project model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigil_core::category::ProjectCategory;
use vigil_core::error::CoreError;
use vigil_core::probe::ProbeSpec;
use vigil_core::types::{DbId, Timestamp};

use crate::models::history::HistoryEntry;

/// Full project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub url: String,
    pub health_check_url: Option<String>,
    pub db_url: Option<String>,
    pub db_key: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: ProjectCategory,
    pub enabled: bool,
    pub created_at: Timestamp,
}

impl Project {
    /// Build the probe spec for this project's category.
    ///
    /// Fails when the row is missing the fields its strategy needs
    /// (e.g. a frontend project without a health-check URL).
    pub fn probe_spec(&self) -> Result<ProbeSpec, CoreError> {
        ProbeSpec::from_parts(
            self.category,
            self.health_check_url.as_deref(),
            self.db_url.as_deref(),
            self.db_key.as_deref(),
        )
    }
}

/// DTO for creating a new project (owner comes from the session).
#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub image: Option<String>,
    pub url: String,
    pub health_check_url: Option<String>,
    pub db_url: Option<String>,
    pub db_key: Option<String>,
    pub category: ProjectCategory,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// DTO for updating a project. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub health_check_url: Option<String>,
    pub db_url: Option<String>,
    pub db_key: Option<String>,
    pub category: Option<ProjectCategory>,
    pub enabled: Option<bool>,
}

/// A project together with its probe history, newest observation first.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithHistory {
    #[serde(flatten)]
    pub project: Project,
    pub history: Vec<HistoryEntry>,
}
