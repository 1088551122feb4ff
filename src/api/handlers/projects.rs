//! Project management handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{ErrorResponse, ResponseStatus};
use crate::api::{ApiError, ApiResult, AppState};
use crate::assets::AssetStore;
use crate::db::{Database, NewProject, Project, ProjectPatch, ProjectRepository};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Project response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    /// Unique identifier (16-character hex)
    #[schema(example = "6720c1a40000002a")]
    pub id: String,
    #[schema(example = "Catalog")]
    pub name: String,
    #[schema(example = "Portfolio site")]
    pub description: String,
    #[schema(example = "web")]
    pub category: String,
    #[schema(example = "active")]
    pub state: String,
    #[schema(example = 2024)]
    pub year: i32,
    /// Name of the associated image asset
    #[schema(example = "default.png")]
    pub image: String,
    /// Creation timestamp (RFC 3339)
    #[schema(example = "2024-11-02T10:15:30.000Z")]
    pub created_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            category: p.category,
            state: p.state,
            year: p.year,
            image: p.image,
            created_at: p.created_at,
        }
    }
}

/// Create project request DTO
///
/// Every field is required. Fields are optional here so a missing field is
/// reported by name instead of as a deserialization failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    #[schema(example = "Catalog")]
    pub name: Option<String>,
    #[schema(example = "Portfolio site")]
    pub description: Option<String>,
    #[schema(example = "web")]
    pub category: Option<String>,
    #[schema(example = 2024)]
    pub year: Option<i32>,
    #[schema(example = "active")]
    pub state: Option<String>,
}

impl CreateProjectRequest {
    /// Check that every field is present and non-blank.
    ///
    /// All missing fields are reported in one message, in declaration order.
    pub fn into_new_project(self) -> ApiResult<NewProject> {
        let text = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        if !text(&self.name) {
            missing.push("name");
        }
        if !text(&self.description) {
            missing.push("description");
        }
        if !text(&self.category) {
            missing.push("category");
        }
        if self.year.is_none() {
            missing.push("year");
        }
        if !text(&self.state) {
            missing.push("state");
        }

        match (self.name, self.description, self.category, self.year, self.state) {
            (Some(name), Some(description), Some(category), Some(year), Some(state))
                if missing.is_empty() =>
            {
                Ok(NewProject {
                    name,
                    description,
                    category,
                    state,
                    year,
                })
            }
            _ => Err(ApiError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Update project request DTO
///
/// Only supplied fields are changed.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    #[schema(example = "Catalog v2")]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
    #[schema(example = "archived")]
    pub state: Option<String>,
    /// Image asset name
    pub image: Option<String>,
}

impl From<UpdateProjectRequest> for ProjectPatch {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            category: req.category,
            state: req.state,
            year: req.year,
            image: req.image,
        }
    }
}

/// Single project envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectEnvelope {
    pub status: ResponseStatus,
    pub project: ProjectResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Project saved")]
    pub message: Option<String>,
}

impl ProjectEnvelope {
    fn new(project: Project, message: Option<&str>) -> Self {
        Self {
            status: ResponseStatus::Success,
            project: project.into(),
            message: message.map(str::to_string),
        }
    }
}

/// Project list envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListEnvelope {
    pub status: ResponseStatus,
    pub projects: Vec<ProjectResponse>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a project
///
/// Validates that every field is present and stores a new project with a
/// generated id and the default image.
#[utoipa::path(
    post,
    path = "/api/project/save",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created", body = ProjectEnvelope),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 500, description = "Store fault", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn save_project<D: Database, A: AssetStore>(
    State(state): State<AppState<D, A>>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> ApiResult<Json<ProjectEnvelope>> {
    let Json(req) = payload?;
    let project = state.db().projects().create(&req.into_new_project()?).await?;

    Ok(Json(ProjectEnvelope::new(project, Some("Project saved"))))
}

/// List all projects
///
/// Returns every stored project in insertion order.
#[utoipa::path(
    get,
    path = "/api/project/list",
    tag = "projects",
    responses(
        (status = 200, description = "All projects", body = ProjectListEnvelope),
        (status = 500, description = "Store fault", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_projects<D: Database, A: AssetStore>(
    State(state): State<AppState<D, A>>,
) -> ApiResult<Json<ProjectListEnvelope>> {
    let projects = state.db().projects().list().await?;

    Ok(Json(ProjectListEnvelope {
        status: ResponseStatus::Success,
        projects: projects.into_iter().map(ProjectResponse::from).collect(),
    }))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/api/project/item/{id}",
    tag = "projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectEnvelope),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Store fault", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project<D: Database, A: AssetStore>(
    State(state): State<AppState<D, A>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectEnvelope>> {
    let project = state.db().projects().get(&id).await?;

    Ok(Json(ProjectEnvelope::new(project, None)))
}

/// Update a project
///
/// Merges the supplied fields into the stored project and returns the
/// post-update state.
#[utoipa::path(
    put,
    path = "/api/project/update/{id}",
    tag = "projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectEnvelope),
        (status = 400, description = "Malformed or empty fields", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Store fault", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_project<D: Database, A: AssetStore>(
    State(state): State<AppState<D, A>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> ApiResult<Json<ProjectEnvelope>> {
    let Json(req) = payload?;
    let project = state.db().projects().update(&id, &req.into()).await?;

    Ok(Json(ProjectEnvelope::new(project, Some("Project updated"))))
}

/// Reject an update that does not name a project
#[utoipa::path(
    put,
    path = "/api/project/update",
    tag = "projects",
    responses(
        (status = 400, description = "Project id is required", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_project_without_id() -> ApiError {
    ApiError::Validation("project id is required".to_string())
}

/// Delete a project
///
/// Returns the removed project. Its image asset is left in place.
#[utoipa::path(
    delete,
    path = "/api/project/delete/{id}",
    tag = "projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted", body = ProjectEnvelope),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Store fault", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_project<D: Database, A: AssetStore>(
    State(state): State<AppState<D, A>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectEnvelope>> {
    let project = state.db().projects().delete(&id).await?;

    Ok(Json(ProjectEnvelope::new(project, Some("Project deleted"))))
}
