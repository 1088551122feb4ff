//! HTTP error mapping for the persistence service.
//!
//! Every failure is rendered as `{"status": "error", "message": ...}` with the
//! matching status code. Store faults are logged and replaced by a fixed
//! message so backend detail never reaches the caller.

use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use thiserror::Error;

use super::handlers::ErrorResponse;
use crate::assets::AssetError;
use crate::db::DbError;

/// Message returned for any store fault.
pub const STORE_FAULT_MESSAGE: &str = "internal storage error";

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("{0}")]
    #[diagnostic(code(catalog::api::validation))]
    Validation(String),

    #[error("{0}")]
    #[diagnostic(code(catalog::api::not_found))]
    NotFound(String),

    #[error("Store fault: {0}")]
    #[diagnostic(code(catalog::api::store))]
    Store(String),

    #[error("Failed to bind {addr}")]
    #[diagnostic(code(catalog::api::bind))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(catalog::api::serve))]
    Serve(#[source] std::io::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Bind { .. } | ApiError::Serve(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { entity_type, id } => {
                ApiError::NotFound(format!("{} '{}' not found", entity_type, id))
            }
            DbError::Validation { message } => ApiError::Validation(message),
            other => ApiError::Store(other.to_string()),
        }
    }
}

impl From<AssetError> for ApiError {
    fn from(e: AssetError) -> Self {
        match e {
            AssetError::NotFound { name } => ApiError::NotFound(format!("Image '{}' not found", name)),
            AssetError::InvalidName { name } => {
                ApiError::Validation(format!("Invalid image name '{}'", name))
            }
            other => ApiError::Store(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Validation(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => msg.clone(),
            _ => {
                tracing::error!(error = %self, "Request failed on store fault");
                STORE_FAULT_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
