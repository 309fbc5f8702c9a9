//! Repository for the `projects` table.
//!
//! Every read and write is owner-scoped: a project row is only ever
//! visible to the user who created it.

use std::collections::HashMap;

use sqlx::PgPool;
use vigil_core::category::ProjectCategory;
use vigil_core::types::DbId;

use crate::models::history::HistoryEntry;
use crate::models::project::{CreateProject, Project, ProjectWithHistory, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, image, url, health_check_url, \
                       db_url, db_key, category, enabled, created_at";

/// Provides CRUD operations for monitored projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project for the given owner, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                 (owner_id, name, image, url, health_check_url, db_url, db_key, category, enabled)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.url)
            .bind(&input.health_check_url)
            .bind(&input.db_url)
            .bind(&input.db_key)
            .bind(input.category.as_str())
            .bind(input.enabled)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID, scoped to its owner.
    pub async fn find_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE owner_id = $1 AND id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all of an owner's projects, name ascending.
    pub async fn list_for_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY name ASC");
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List an owner's enabled projects in one category -- the batch
    /// the probe engine fans out over.
    pub async fn list_enabled_by_category(
        pool: &PgPool,
        owner_id: DbId,
        category: ProjectCategory,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE owner_id = $1 AND category = $2 AND enabled = true
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(category.as_str())
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the owner has no project with the given `id`.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($3, name),
                image = COALESCE($4, image),
                url = COALESCE($5, url),
                health_check_url = COALESCE($6, health_check_url),
                db_url = COALESCE($7, db_url),
                db_key = COALESCE($8, db_key),
                category = COALESCE($9, category),
                enabled = COALESCE($10, enabled)
             WHERE owner_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.url)
            .bind(&input.health_check_url)
            .bind(&input.db_url)
            .bind(&input.db_key)
            .bind(input.category.map(|c| c.as_str()))
            .bind(input.enabled)
            .fetch_optional(pool)
            .await
    }

    /// Flip a project's enabled flag. Returns `true` if a row was updated.
    pub async fn set_enabled(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        enabled: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET enabled = $3 WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .bind(enabled)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project together with its history, atomically.
    ///
    /// Returns `false` (and deletes nothing) if the owner has no
    /// project with the given `id`.
    pub async fn delete_with_history(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // History rows reference the project, so they go first.
        sqlx::query(
            "DELETE FROM history WHERE project_id IN
                 (SELECT id FROM projects WHERE owner_id = $1 AND id = $2)",
        )
        .bind(owner_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM projects WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch one project with its full history, newest observation first.
    pub async fn find_with_history(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<ProjectWithHistory>, sqlx::Error> {
        let Some(project) = Self::find_for_owner(pool, owner_id, id).await? else {
            return Ok(None);
        };

        let history = sqlx::query_as::<_, HistoryEntry>(
            "SELECT id, project_id, status, checked_at FROM history
             WHERE project_id = $1 ORDER BY checked_at DESC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(Some(ProjectWithHistory { project, history }))
    }

    /// Fetch all of an owner's projects with their histories, grouped
    /// by category. Projects are name ascending, history newest first.
    pub async fn list_with_history_by_category(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<HashMap<ProjectCategory, Vec<ProjectWithHistory>>, sqlx::Error> {
        let projects = Self::list_for_owner(pool, owner_id).await?;

        let history = sqlx::query_as::<_, HistoryEntry>(
            "SELECT h.id, h.project_id, h.status, h.checked_at
             FROM history h
             JOIN projects p ON p.id = h.project_id
             WHERE p.owner_id = $1
             ORDER BY h.checked_at DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        let mut history_by_project: HashMap<DbId, Vec<HistoryEntry>> = HashMap::new();
        for entry in history {
            history_by_project
                .entry(entry.project_id)
                .or_default()
                .push(entry);
        }

        let mut grouped: HashMap<ProjectCategory, Vec<ProjectWithHistory>> = HashMap::new();
        for project in projects {
            let history = history_by_project.remove(&project.id).unwrap_or_default();
            grouped
                .entry(project.category)
                .or_default()
                .push(ProjectWithHistory { project, history });
        }

        Ok(grouped)
    }
}
