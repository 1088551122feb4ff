//! Liveness probe for the catalog backend.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::assets::AssetStore;
use crate::db::Database;

/// Backend liveness report
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the project store answers, `degraded` otherwise
    #[schema(example = "ok")]
    pub status: String,
    /// Whether the project store answered a trivial query
    #[schema(example = true)]
    pub store: bool,
}

/// Report whether the backend can reach its project store
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Project store reachable", body = HealthResponse),
        (status = 503, description = "Project store unreachable", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<D: Database, A: AssetStore>(
    State(state): State<AppState<D, A>>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.db().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                store: true,
            }),
        ),
        Err(e) => {
            warn!(error = %e, "Project store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    store: false,
                }),
            )
        }
    }
}
