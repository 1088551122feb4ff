//! Request handlers and the shared response envelope.

mod images;
mod projects;
mod system;

#[cfg(test)]
mod projects_test;

pub use images::*;
pub use projects::*;
pub use system::*;

use serde::Serialize;
use utoipa::ToSchema;

/// Outcome marker carried by every JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Error response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "error")]
    pub status: ResponseStatus,
    /// Human readable reason
    #[schema(example = "missing required fields: name, year")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }
}
