use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::newsletters::{NewsletterList, SubscribeRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Newsletter,
    response::ApiResponse,
    routes::params::SearchQuery,
    services::newsletter_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subscribers).post(subscribe))
        .route("/{id}", delete(unsubscribe))
}

#[utoipa::path(
    get,
    path = "/api/admin/newsletters",
    params(SearchQuery),
    responses(
        (status = 200, description = "List newsletter subscribers, newest first", body = ApiResponse<NewsletterList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Newsletters"
)]
pub async fn list_subscribers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<NewsletterList>>> {
    let resp = newsletter_service::list_subscribers(&state.pool, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/newsletters",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription for the address, created if missing", body = ApiResponse<Newsletter>),
        (status = 400, description = "Invalid email"),
    ),
    security(("bearer_auth" = [])),
    tag = "Newsletters"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SubscribeRequest>,
) -> AppResult<Json<ApiResponse<Newsletter>>> {
    let resp = newsletter_service::subscribe(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/newsletters/{id}",
    params(("id" = Uuid, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Unsubscribed"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Newsletters"
)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = newsletter_service::unsubscribe(&state.pool, &user, id).await?;
    Ok(Json(resp))
}
