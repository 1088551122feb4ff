//! Image upload and retrieval handlers.

use std::path::Path as FsPath;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::{ErrorResponse, ResponseStatus};
use crate::api::{ApiError, ApiResult, AppState};
use crate::assets::AssetStore;
use crate::db::{Database, ProjectRepository};

/// Multipart field that carries the uploaded file.
pub const UPLOAD_FIELD: &str = "file0";

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted image extensions, lowercase.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Multipart upload form (documentation only)
#[derive(ToSchema)]
pub struct UploadImageForm {
    /// Image file (png, jpg, jpeg or gif)
    #[schema(value_type = String, format = Binary)]
    pub file0: Vec<u8>,
}

/// Upload result envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadEnvelope {
    pub status: ResponseStatus,
    /// Generated asset name, usable with the image endpoint
    #[schema(example = "project-1730542530000-0-cover.png")]
    pub file: String,
    #[schema(example = "Image uploaded")]
    pub message: String,
}

fn check_extension(file_name: &str) -> ApiResult<()> {
    let extension = FsPath::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ApiError::Validation(format!(
            "unsupported image type '{}', expected one of: {}",
            file_name,
            IMAGE_EXTENSIONS.join(", ")
        ))),
    }
}

/// Upload an image for a project
///
/// Stores the file under a generated name. The project must exist, but its
/// `image` field is not changed; callers attach the returned name with an
/// update.
#[utoipa::path(
    put,
    path = "/api/project/upload/{id}",
    tag = "images",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadEnvelope),
        (status = 400, description = "Missing file or unsupported type", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Store fault", body = ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn upload_image<D: Database, A: AssetStore>(
    State(state): State<AppState<D, A>>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadEnvelope>> {
    state.db().projects().get(&id).await?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(ApiError::Validation(format!(
                "exactly one file must be sent in field '{UPLOAD_FIELD}'"
            )));
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let (file_name, bytes) = upload.ok_or_else(|| {
        ApiError::Validation(format!("no file was sent in field '{UPLOAD_FIELD}'"))
    })?;
    check_extension(&file_name)?;

    let file = state.assets().put(&file_name, &bytes).await?;
    info!(project = %id, file = %file, size = bytes.len(), "Image uploaded");

    Ok(Json(UploadEnvelope {
        status: ResponseStatus::Success,
        file,
        message: "Image uploaded".to_string(),
    }))
}

/// Fetch an image by its asset name
///
/// Responds with the raw bytes and a content type derived from the name.
#[utoipa::path(
    get,
    path = "/api/project/image/{file}",
    tag = "images",
    params(
        ("file" = String, Path, description = "Asset name returned by the upload endpoint")
    ),
    responses(
        (status = 200, description = "Raw image bytes with a content type derived from the name"),
        (status = 400, description = "Invalid asset name", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Store fault", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_image<D: Database, A: AssetStore>(
    State(state): State<AppState<D, A>>,
    Path(file): Path<String>,
) -> ApiResult<Response> {
    let asset = state.assets().get(&file).await?;

    Ok(([(header::CONTENT_TYPE, asset.content_type)], asset.bytes).into_response())
}
