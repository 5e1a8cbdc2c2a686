//! OpenAPI 3.0 documentation assembly

use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Entity App API",
        version = "0.1.0",
        description = "CRUD resource for paginated entities"
    ),
    tags(
        (name = "System", description = "Health checks and system status"),
        (name = "EntityWithPagination", description = "EntityWithPagination resource"),
    ),
    components(
        schemas(
            crate::domain::EntityWithPagination,
            crate::api::health::HealthResponse,
        ),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,
        crate::api::entity_with_pagination::create,
        crate::api::entity_with_pagination::update,
        crate::api::entity_with_pagination::list,
        crate::api::entity_with_pagination::get,
        crate::api::entity_with_pagination::delete,
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
