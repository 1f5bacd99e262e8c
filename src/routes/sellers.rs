use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        catalog::ActivityList,
        sellers::{ActivitySummary, SellerDetail, SellerList},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Seller,
    response::ApiResponse,
    routes::params::{ActivityQuery, SellerQuery},
    services::seller_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sellers))
        .route("/{id}", get(get_seller))
        .route("/{id}/refresh", post(refresh_counters))
        .route("/{id}/activity", get(list_activity))
        .route("/{id}/activity/summary", get(activity_summary))
}

#[utoipa::path(
    get,
    path = "/api/admin/sellers",
    params(SellerQuery),
    responses(
        (status = 200, description = "List sellers", body = ApiResponse<SellerList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn list_sellers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SellerQuery>,
) -> AppResult<Json<ApiResponse<SellerList>>> {
    let resp = seller_service::list_sellers(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/sellers/{id}",
    params(("id" = Uuid, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Seller with its product listings", body = ApiResponse<SellerDetail>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn get_seller(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SellerDetail>>> {
    let resp = seller_service::get_seller(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/sellers/{id}/refresh",
    params(("id" = Uuid, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Recompute product count and sales", body = ApiResponse<Seller>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn refresh_counters(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Seller>>> {
    let resp = seller_service::refresh_counters(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/sellers/{id}/activity",
    params(
        ("id" = Uuid, Path, description = "Seller ID"),
        ActivityQuery
    ),
    responses(
        (status = 200, description = "Seller activity, newest first", body = ApiResponse<ActivityList>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn list_activity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<ApiResponse<ActivityList>>> {
    let resp = seller_service::list_activity(&state, &user, id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/sellers/{id}/activity/summary",
    params(("id" = Uuid, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Event counts per activity type", body = ApiResponse<ActivitySummary>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn activity_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ActivitySummary>>> {
    let resp = seller_service::activity_summary(&state, &user, id).await?;
    Ok(Json(resp))
}
