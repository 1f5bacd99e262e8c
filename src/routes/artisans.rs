use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{ArtisanList, ArtisanRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Artisan,
    response::ApiResponse,
    routes::params::ArtisanQuery,
    services::artisan_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_artisans).post(create_artisan))
        .route(
            "/{id}",
            get(get_artisan).put(update_artisan).delete(delete_artisan),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/artisans",
    params(ArtisanQuery),
    responses(
        (status = 200, description = "List artisans", body = ApiResponse<ArtisanList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Artisans"
)]
pub async fn list_artisans(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ArtisanQuery>,
) -> AppResult<Json<ApiResponse<ArtisanList>>> {
    let resp = artisan_service::list_artisans(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/artisans/{id}",
    params(("id" = Uuid, Path, description = "Artisan ID")),
    responses(
        (status = 200, description = "Get artisan", body = ApiResponse<Artisan>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Artisans"
)]
pub async fn get_artisan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Artisan>>> {
    let resp = artisan_service::get_artisan(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/artisans",
    request_body = ArtisanRequest,
    responses(
        (status = 201, description = "Create artisan", body = ApiResponse<Artisan>),
        (status = 400, description = "Invalid payload or unknown region"),
        (status = 409, description = "Slug already in use"),
    ),
    security(("bearer_auth" = [])),
    tag = "Artisans"
)]
pub async fn create_artisan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ArtisanRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Artisan>>)> {
    let resp = artisan_service::create_artisan(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/artisans/{id}",
    params(("id" = Uuid, Path, description = "Artisan ID")),
    request_body = ArtisanRequest,
    responses(
        (status = 200, description = "Update artisan", body = ApiResponse<Artisan>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Slug already in use"),
    ),
    security(("bearer_auth" = [])),
    tag = "Artisans"
)]
pub async fn update_artisan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArtisanRequest>,
) -> AppResult<Json<ApiResponse<Artisan>>> {
    let resp = artisan_service::update_artisan(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/artisans/{id}",
    params(("id" = Uuid, Path, description = "Artisan ID")),
    responses(
        (status = 200, description = "Delete artisan"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Artisans"
)]
pub async fn delete_artisan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = artisan_service::delete_artisan(&state, &user, id).await?;
    Ok(Json(resp))
}
