use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    audit,
    dto::content::{CreateStoryPostRequest, StoryList, StoryPostList, StoryRequest},
    entity::{
        Artisans, Products, Regions, Users,
        cultural_stories::{self, Column as StoryCol, Entity as CulturalStories},
        regions,
        story_posts::{self, Column as PostCol, Entity as StoryPosts, MAX_CONTENT_CHARS},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{CulturalStory, StoryPost},
    response::{ApiResponse, Meta},
    routes::params::{StoryPostQuery, StoryQuery, like_pattern},
    services::{catalog_service::required, ensure_exists, ensure_slug_available},
    slug::slug_or_derive,
    state::AppState,
};

pub const DEFAULT_STORY_CATEGORY: &str = "Heritage";
const MAX_TITLE_CHARS: usize = 300;

pub async fn list_stories(
    state: &AppState,
    user: &AuthUser,
    query: StoryQuery,
) -> AppResult<ApiResponse<StoryList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(region_id) = query.region_id {
        condition = condition.add(StoryCol::RegionId.eq(region_id));
    }
    if let Some(published) = query.published {
        condition = condition.add(StoryCol::Published.eq(published));
    }
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        condition = condition.add(StoryCol::Category.eq(category));
    }
    if let Some(term) = query.search() {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((CulturalStories, StoryCol::Title)).ilike(pattern.clone()))
                .add(Expr::col((CulturalStories, StoryCol::Content)).ilike(pattern.clone()))
                .add(Expr::col((Regions, regions::Column::Name)).ilike(pattern)),
        );
    }

    let finder = CulturalStories::find()
        .join(JoinType::LeftJoin, cultural_stories::Relation::Regions.def())
        .filter(condition)
        .order_by_desc(StoryCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(CulturalStory::from)
        .collect();

    Ok(ApiResponse::success(
        "Stories",
        StoryList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_story(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<CulturalStory>> {
    ensure_admin(user)?;
    let story = CulturalStories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Story", story.into(), None))
}

fn validate_title(title: String) -> AppResult<String> {
    let title = required(title, "title")?;
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::BadRequest(format!(
            "title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(title)
}

pub async fn create_story(
    state: &AppState,
    user: &AuthUser,
    payload: StoryRequest,
) -> AppResult<ApiResponse<CulturalStory>> {
    ensure_admin(user)?;
    let title = validate_title(payload.title)?;
    let slug = slug_or_derive(payload.slug.as_deref(), &title)?;
    ensure_slug_available::<CulturalStories, _>(
        &state.orm,
        StoryCol::Slug,
        StoryCol::Id,
        &slug,
        None,
    )
    .await?;
    ensure_exists::<Regions, _>(&state.orm, payload.region_id, "region").await?;

    let story = cultural_stories::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        slug: Set(slug),
        content: Set(payload.content),
        author: Set(payload.author.unwrap_or_default()),
        featured_image: Set(payload.featured_image),
        region_id: Set(payload.region_id),
        category: Set(payload
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORY_CATEGORY.to_string())),
        published: Set(payload.published.unwrap_or(true)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "story_create",
        "stories",
        json!({ "story_id": story.id, "slug": story.slug }),
    )
    .await;

    Ok(ApiResponse::success(
        "Story created",
        story.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_story(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: StoryRequest,
) -> AppResult<ApiResponse<CulturalStory>> {
    ensure_admin(user)?;
    let existing = CulturalStories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let title = validate_title(payload.title)?;
    let slug = slug_or_derive(payload.slug.as_deref(), &title)?;
    ensure_slug_available::<CulturalStories, _>(
        &state.orm,
        StoryCol::Slug,
        StoryCol::Id,
        &slug,
        Some(id),
    )
    .await?;
    ensure_exists::<Regions, _>(&state.orm, payload.region_id, "region").await?;

    let mut active: cultural_stories::ActiveModel = existing.into();
    active.title = Set(title);
    active.slug = Set(slug);
    active.content = Set(payload.content);
    active.featured_image = Set(payload.featured_image);
    active.region_id = Set(payload.region_id);
    if let Some(author) = payload.author {
        active.author = Set(author);
    }
    if let Some(category) = payload.category.filter(|c| !c.trim().is_empty()) {
        active.category = Set(category);
    }
    if let Some(published) = payload.published {
        active.published = Set(published);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    let story = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "story_update",
        "stories",
        json!({ "story_id": story.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", story.into(), Some(Meta::empty())))
}

pub async fn delete_story(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = CulturalStories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "story_delete",
        "stories",
        json!({ "story_id": id }),
    )
    .await;

    Ok(ApiResponse::success("Deleted", json!({}), Some(Meta::empty())))
}

pub async fn list_posts(
    state: &AppState,
    user: &AuthUser,
    query: StoryPostQuery,
) -> AppResult<ApiResponse<StoryPostList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(user_id) = query.user_id {
        condition = condition.add(PostCol::UserId.eq(user_id));
    }
    if let Some(term) = query.search() {
        condition = condition.add(Expr::col(PostCol::Content).ilike(like_pattern(term)));
    }

    let finder = StoryPosts::find()
        .filter(condition)
        .order_by_desc(PostCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(StoryPost::from)
        .collect();

    Ok(ApiResponse::success(
        "Story posts",
        StoryPostList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Trimmed post body, rejected when empty or longer than the post limit.
pub fn validate_post_content(content: &str) -> AppResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("content must not be empty".into()));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::BadRequest(format!(
            "content must be at most {MAX_CONTENT_CHARS} characters"
        )));
    }
    Ok(content.to_string())
}

pub async fn create_post(
    state: &AppState,
    user: &AuthUser,
    payload: CreateStoryPostRequest,
) -> AppResult<ApiResponse<StoryPost>> {
    ensure_admin(user)?;
    let content = validate_post_content(&payload.content)?;
    ensure_exists::<Users, _>(&state.orm, payload.user_id, "user").await?;
    if let Some(id) = payload.mentioned_product_id {
        ensure_exists::<Products, _>(&state.orm, id, "product").await?;
    }
    if let Some(id) = payload.mentioned_artisan_id {
        ensure_exists::<Artisans, _>(&state.orm, id, "artisan").await?;
    }

    let post = story_posts::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(payload.user_id),
        content: Set(content),
        mentioned_product_id: Set(payload.mentioned_product_id),
        mentioned_artisan_id: Set(payload.mentioned_artisan_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "story_post_create",
        "story-posts",
        json!({ "post_id": post.id, "author_id": post.user_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Story post created",
        post.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_post(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = StoryPosts::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "story_post_delete",
        "story-posts",
        json!({ "post_id": id }),
    )
    .await;

    Ok(ApiResponse::success("Deleted", json!({}), Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_content_is_trimmed_and_bounded() {
        assert_eq!(
            validate_post_content("  Loved the Kantha workshop  ").unwrap(),
            "Loved the Kantha workshop"
        );
        assert!(validate_post_content("   ").is_err());

        let at_limit = "क".repeat(MAX_CONTENT_CHARS);
        assert!(validate_post_content(&at_limit).is_ok());
        let over = "a".repeat(MAX_CONTENT_CHARS + 1);
        assert!(matches!(
            validate_post_content(&over),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn story_titles_are_bounded() {
        assert!(validate_title("Threads of Bengal".into()).is_ok());
        assert!(validate_title("x".repeat(MAX_TITLE_CHARS + 1)).is_err());
    }
}
