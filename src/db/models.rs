//! Domain models for the catalog database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

use super::{DbError, DbResult};

/// Store-assigned hex ID type.
pub type Id = String;

/// Image name used until an asset has been attached to a project.
pub const DEFAULT_IMAGE: &str = "default.png";

/// A catalogued project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Free-form status label ("active", "archived", ...).
    pub state: String,
    pub year: i32,
    /// Name of the associated asset. Never checked against the asset store.
    pub image: String,
    pub created_at: String,
}

/// Fields required to create a project.
///
/// The store assigns `id`, `image` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub category: String,
    pub state: String,
    pub year: i32,
}

impl NewProject {
    /// Trim the description and reject blank required fields.
    ///
    /// Every blank field is reported in one message.
    pub fn normalized(&self) -> DbResult<NewProject> {
        let description = self.description.trim().to_string();

        let blank: Vec<&str> = [
            ("name", self.name.as_str()),
            ("description", description.as_str()),
            ("category", self.category.as_str()),
            ("state", self.state.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !blank.is_empty() {
            return Err(DbError::Validation {
                message: format!("missing required fields: {}", blank.join(", ")),
            });
        }

        Ok(NewProject {
            name: self.name.clone(),
            description,
            category: self.category.clone(),
            state: self.state.clone(),
            year: self.year,
        })
    }
}

/// Merge-patch for an existing project.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub state: Option<String>,
    pub year: Option<i32>,
    pub image: Option<String>,
}

impl ProjectPatch {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.state.is_none()
            && self.year.is_none()
            && self.image.is_none()
    }

    /// Trim the description and reject supplied-but-blank fields.
    pub fn normalized(&self) -> DbResult<ProjectPatch> {
        let description = self.description.as_deref().map(|d| d.trim().to_string());

        let blank: Vec<&str> = [
            ("name", self.name.as_deref()),
            ("description", description.as_deref()),
            ("category", self.category.as_deref()),
            ("state", self.state.as_deref()),
            ("image", self.image.as_deref()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_some_and(|v| v.trim().is_empty()))
        .map(|(field, _)| field)
        .collect();

        if !blank.is_empty() {
            return Err(DbError::Validation {
                message: format!("fields must not be empty: {}", blank.join(", ")),
            });
        }

        Ok(ProjectPatch {
            description,
            ..self.clone()
        })
    }
}
