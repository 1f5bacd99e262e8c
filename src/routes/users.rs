use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::users::{UserList, UserWithProfile},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::UserQuery,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}/verify-seller", post(verify_seller))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(UserQuery),
    responses(
        (status = 200, description = "List users with their profiles", body = ApiResponse<UserList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/verify-seller",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Seller verified", body = ApiResponse<UserWithProfile>),
        (status = 400, description = "User is not a seller"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn verify_seller(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserWithProfile>>> {
    let resp = user_service::verify_seller(&state, &user, id).await?;
    Ok(Json(resp))
}
