//! EntityWithPagination REST resource

use crate::api::{headers, pagination_headers, PageableQuery};
use crate::domain::entity_with_pagination::ENTITY_NAME;
use crate::domain::EntityWithPagination;
use crate::error::{AppError, Result};
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query;
use tracing::debug;

pub const RESOURCE_PATH: &str = "/api/entity-with-paginations";

/// Create an entity; the id is assigned on save
#[utoipa::path(
    post,
    path = "/api/entity-with-paginations",
    tag = "EntityWithPagination",
    request_body = EntityWithPagination,
    responses(
        (status = 201, description = "Created", body = EntityWithPagination),
        (status = 400, description = "Entity already has an id")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<EntityWithPagination>,
) -> Result<impl IntoResponse> {
    debug!("REST request to save EntityWithPagination: {:?}", input);
    let saved = state.entity_with_pagination_service().create(input).await?;
    let id = saved
        .id
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Saved entity has no id")))?;

    let mut response_headers = headers::entity_creation_alert(ENTITY_NAME, &id.to_string());
    if let Ok(location) = HeaderValue::from_str(&format!("{}/{}", RESOURCE_PATH, id)) {
        response_headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, response_headers, Json(saved)))
}

/// Replace an existing entity
#[utoipa::path(
    put,
    path = "/api/entity-with-paginations",
    tag = "EntityWithPagination",
    request_body = EntityWithPagination,
    responses(
        (status = 200, description = "Updated", body = EntityWithPagination),
        (status = 400, description = "Entity has no id")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<EntityWithPagination>,
) -> Result<impl IntoResponse> {
    debug!("REST request to update EntityWithPagination: {:?}", input);
    let saved = state.entity_with_pagination_service().update(input).await?;
    let param = saved.id.map(|id| id.to_string()).unwrap_or_default();
    Ok((
        headers::entity_update_alert(ENTITY_NAME, &param),
        Json(saved),
    ))
}

/// List one page of entities
#[utoipa::path(
    get,
    path = "/api/entity-with-paginations",
    tag = "EntityWithPagination",
    params(
        ("page" = Option<i64>, Query, description = "Zero-based page index"),
        ("size" = Option<i64>, Query, description = "Page size"),
        ("sort" = Option<Vec<String>>, Query, description = "property[,asc|desc]")
    ),
    responses(
        (status = 200, description = "Success", body = [EntityWithPagination])
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<PageableQuery>,
) -> Result<impl IntoResponse> {
    let page = query.into_page_request()?;
    debug!("REST request to get a page of EntityWithPaginations: {:?}", page);
    let (entities, total) = state.entity_with_pagination_service().list(&page).await?;
    Ok((pagination_headers(RESOURCE_PATH, &page, total), Json(entities)))
}

/// Get entity by ID
#[utoipa::path(
    get,
    path = "/api/entity-with-paginations/{id}",
    tag = "EntityWithPagination",
    params(("id" = i64, Path, description = "Entity id")),
    responses(
        (status = 200, description = "Success", body = EntityWithPagination),
        (status = 404, description = "Not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let entity = state.entity_with_pagination_service().get(id).await?;
    Ok(Json(entity))
}

/// Delete entity by ID; succeeds whether or not the row exists
#[utoipa::path(
    delete,
    path = "/api/entity-with-paginations/{id}",
    tag = "EntityWithPagination",
    params(("id" = i64, Path, description = "Entity id")),
    responses(
        (status = 200, description = "Deleted")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    debug!("REST request to delete EntityWithPagination: {}", id);
    state.entity_with_pagination_service().delete(id).await?;
    Ok((
        StatusCode::OK,
        headers::entity_deletion_alert(ENTITY_NAME, &id.to_string()),
    ))
}
