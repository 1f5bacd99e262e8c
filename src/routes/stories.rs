use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::content::{CreateStoryPostRequest, StoryList, StoryPostList, StoryRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{CulturalStory, StoryPost},
    response::ApiResponse,
    routes::params::{StoryPostQuery, StoryQuery},
    services::story_service,
    state::AppState,
};

pub fn stories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stories).post(create_story))
        .route("/{id}", get(get_story).put(update_story).delete(delete_story))
}

pub fn posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", delete(delete_post))
}

#[utoipa::path(
    get,
    path = "/api/admin/stories",
    params(StoryQuery),
    responses(
        (status = 200, description = "List cultural stories", body = ApiResponse<StoryList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stories"
)]
pub async fn list_stories(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StoryQuery>,
) -> AppResult<Json<ApiResponse<StoryList>>> {
    let resp = story_service::list_stories(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/stories/{id}",
    params(("id" = Uuid, Path, description = "Story ID")),
    responses(
        (status = 200, description = "Get story", body = ApiResponse<CulturalStory>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stories"
)]
pub async fn get_story(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CulturalStory>>> {
    let resp = story_service::get_story(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/stories",
    request_body = StoryRequest,
    responses(
        (status = 201, description = "Create story", body = ApiResponse<CulturalStory>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Slug already in use"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stories"
)]
pub async fn create_story(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<StoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CulturalStory>>)> {
    let resp = story_service::create_story(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/stories/{id}",
    params(("id" = Uuid, Path, description = "Story ID")),
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Update story", body = ApiResponse<CulturalStory>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Slug already in use"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stories"
)]
pub async fn update_story(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StoryRequest>,
) -> AppResult<Json<ApiResponse<CulturalStory>>> {
    let resp = story_service::update_story(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/stories/{id}",
    params(("id" = Uuid, Path, description = "Story ID")),
    responses(
        (status = 200, description = "Delete story"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stories"
)]
pub async fn delete_story(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = story_service::delete_story(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/story-posts",
    params(StoryPostQuery),
    responses(
        (status = 200, description = "List story posts", body = ApiResponse<StoryPostList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stories"
)]
pub async fn list_posts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StoryPostQuery>,
) -> AppResult<Json<ApiResponse<StoryPostList>>> {
    let resp = story_service::list_posts(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/story-posts",
    request_body = CreateStoryPostRequest,
    responses(
        (status = 201, description = "Create story post", body = ApiResponse<StoryPost>),
        (status = 400, description = "Empty or over-long content, or unknown mention"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stories"
)]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateStoryPostRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<StoryPost>>)> {
    let resp = story_service::create_post(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/story-posts/{id}",
    params(("id" = Uuid, Path, description = "Story post ID")),
    responses(
        (status = 200, description = "Delete story post"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stories"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = story_service::delete_post(&state, &user, id).await?;
    Ok(Json(resp))
}
