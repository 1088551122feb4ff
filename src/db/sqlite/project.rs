//! SQLite ProjectRepository implementation.

use sqlx::SqlitePool;

use super::helpers::{PROJECT_COLUMNS, project_from_row};
use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{
    DEFAULT_IMAGE, DbError, DbResult, NewProject, Project, ProjectPatch, ProjectRepository,
};

/// SQLx-backed project repository.
pub struct SqliteProjectRepository {
    pub(crate) pool: SqlitePool,
}

fn not_found(id: &str) -> DbError {
    DbError::NotFound {
        entity_type: "Project".to_string(),
        id: id.to_string(),
    }
}

fn require_id(id: &str) -> DbResult<()> {
    if id.trim().is_empty() {
        return Err(DbError::Validation {
            message: "project id is required".to_string(),
        });
    }
    Ok(())
}

impl ProjectRepository for SqliteProjectRepository {
    async fn create(&self, project: &NewProject) -> DbResult<Project> {
        let project = project.normalized()?;

        // Always generate id and timestamp - never use caller input
        let id = generate_entity_id();
        let created_at = current_timestamp();

        sqlx::query(
            "INSERT INTO project (id, name, description, category, state, year, image, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.category)
        .bind(&project.state)
        .bind(project.year)
        .bind(DEFAULT_IMAGE)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(Project {
            id,
            name: project.name,
            description: project.description,
            category: project.category,
            state: project.state,
            year: project.year,
            image: DEFAULT_IMAGE.to_string(),
            created_at,
        })
    }

    async fn get(&self, id: &str) -> DbResult<Project> {
        let row = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM project WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(project_from_row).ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> DbResult<Vec<Project>> {
        let rows = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM project ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(project_from_row).collect())
    }

    async fn update(&self, id: &str, patch: &ProjectPatch) -> DbResult<Project> {
        require_id(id)?;
        let patch = patch.normalized()?;

        // Single statement: omitted fields keep their stored value
        let row = sqlx::query(&format!(
            "UPDATE project SET \
                name = COALESCE(?, name), \
                description = COALESCE(?, description), \
                category = COALESCE(?, category), \
                state = COALESCE(?, state), \
                year = COALESCE(?, year), \
                image = COALESCE(?, image) \
             WHERE id = ? RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.category)
        .bind(&patch.state)
        .bind(patch.year)
        .bind(&patch.image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(project_from_row).ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: &str) -> DbResult<Project> {
        require_id(id)?;

        let row = sqlx::query(&format!(
            "DELETE FROM project WHERE id = ? RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(project_from_row).ok_or_else(|| not_found(id))
    }
}
