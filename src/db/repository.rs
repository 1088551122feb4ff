//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Methods return `Send` futures so handlers generic over [`Database`] can
//! run on the multi-threaded runtime.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{NewProject, Project, ProjectPatch},
};

/// Repository for Project operations.
pub trait ProjectRepository: Send + Sync {
    /// Validate and store a new project, returning it with its assigned id.
    fn create(&self, project: &NewProject) -> impl Future<Output = DbResult<Project>> + Send;

    /// Get a project by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Project>> + Send;

    /// Get all projects in insertion order.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Project>>> + Send;

    /// Apply a merge-patch and return the full updated project.
    fn update(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> impl Future<Output = DbResult<Project>> + Send;

    /// Delete a project by ID, returning the removed record.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<Project>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync + 'static {
    type Projects: ProjectRepository;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Round-trip a trivial query to confirm the store is reachable.
    fn ping(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the project repository.
    fn projects(&self) -> Self::Projects;

    /// Drain and close the underlying connections.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
