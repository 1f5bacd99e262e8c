use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::content::GalleryList,
    error::AppResult,
    middleware::auth::AuthUser,
    models::GalleryImage,
    response::ApiResponse,
    routes::params::GalleryQuery,
    services::gallery_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_images))
        .route("/{id}", get(get_image).delete(delete_image))
}

#[utoipa::path(
    get,
    path = "/api/admin/gallery",
    params(GalleryQuery),
    responses(
        (status = 200, description = "List gallery images, featured first", body = ApiResponse<GalleryList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
pub async fn list_images(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<GalleryQuery>,
) -> AppResult<Json<ApiResponse<GalleryList>>> {
    let resp = gallery_service::list_images(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses(
        (status = 200, description = "Get gallery image", body = ApiResponse<GalleryImage>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
pub async fn get_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<GalleryImage>>> {
    let resp = gallery_service::get_image(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses(
        (status = 200, description = "Delete gallery image"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
pub async fn delete_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = gallery_service::delete_image(&state, &user, id).await?;
    Ok(Json(resp))
}
