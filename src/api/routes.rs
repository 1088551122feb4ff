//! API route configuration.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateProjectRequest, ErrorResponse, HealthResponse, MAX_UPLOAD_BYTES,
    ProjectEnvelope, ProjectListEnvelope, ProjectResponse, ResponseStatus, UpdateProjectRequest,
    UploadEnvelope, UploadImageForm,
};
use super::state::AppState;
use crate::assets::AssetStore;
use crate::db::Database;

/// Mount point of the project resource.
pub const API_PREFIX: &str = "/api/project";

/// Build routes with generic store types.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database and AssetStore traits. It applies the turbofish
/// operator automatically.
macro_rules! routes {
    ($D:ty, $A:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D, $A>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Project catalog with image assets",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::save_project,
        handlers::list_projects,
        handlers::get_project,
        handlers::update_project,
        handlers::update_project_without_id,
        handlers::delete_project,
        handlers::upload_image,
        handlers::get_image,
    ),
    components(
        schemas(
            HealthResponse,
            ResponseStatus,
            ProjectResponse,
            CreateProjectRequest,
            UpdateProjectRequest,
            ProjectEnvelope,
            ProjectListEnvelope,
            UploadEnvelope,
            UploadImageForm,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "projects", description = "Project management endpoints"),
        (name = "images", description = "Project image endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database, A: AssetStore>(state: AppState<D, A>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/health", get(handlers::health::<D, A>));

    let project_routes = routes!(D, A => {
        post "/save" => handlers::save_project,
        get "/list" => handlers::list_projects,
        get "/item/{id}" => handlers::get_project,
        put "/update/{id}" => handlers::update_project,
        delete "/delete/{id}" => handlers::delete_project,
        put "/upload/{id}" => handlers::upload_image,
        get "/image/{file}" => handlers::get_image,
    })
    .route("/update", put(handlers::update_project_without_id));

    system_routes
        .nest(API_PREFIX, project_routes)
        .merge(Scalar::with_url("/docs", api))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
