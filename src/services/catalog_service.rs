use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::catalog::{CategoryList, CategoryRequest, RegionList, RegionRequest},
    entity::{
        categories::{self, Column as CatCol, Entity as Categories},
        regions::{self, Column as RegionCol, Entity as Regions},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Region},
    response::{ApiResponse, Meta},
    routes::params::{SearchQuery, like_pattern},
    services::ensure_slug_available,
    slug::slug_or_derive,
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<CategoryList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = Categories::find().order_by_asc(CatCol::Name);
    if let Some(term) = query.search() {
        finder = finder.filter(Expr::col(CatCol::Name).ilike(like_pattern(term)));
    }

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Category", category.into(), None))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let name = required(payload.name, "name")?;
    let slug = slug_or_derive(payload.slug.as_deref(), &name)?;
    ensure_slug_available::<Categories, _>(&state.orm, CatCol::Slug, CatCol::Id, &slug, None)
        .await?;

    let category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        slug: Set(slug),
        description: Set(payload.description.unwrap_or_default()),
        image: Set(payload.image.unwrap_or_default()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id, "slug": category.slug }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        category.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let existing = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let name = required(payload.name, "name")?;
    let slug = slug_or_derive(payload.slug.as_deref(), &name)?;
    ensure_slug_available::<Categories, _>(&state.orm, CatCol::Slug, CatCol::Id, &slug, Some(id))
        .await?;

    let mut active: categories::ActiveModel = existing.into();
    active.name = Set(name);
    active.slug = Set(slug);
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    let category = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "category_update",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        category.into(),
        Some(Meta::empty()),
    ))
}

/// Products in the category keep existing with no category.
pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_regions(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<RegionList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = Regions::find().order_by_asc(RegionCol::Name);
    if let Some(term) = query.search() {
        finder = finder.filter(Expr::col(RegionCol::Name).ilike(like_pattern(term)));
    }

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Region::from)
        .collect();

    Ok(ApiResponse::success(
        "Regions",
        RegionList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_region(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Region>> {
    ensure_admin(user)?;
    let region = Regions::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Region", region.into(), None))
}

pub async fn create_region(
    state: &AppState,
    user: &AuthUser,
    payload: RegionRequest,
) -> AppResult<ApiResponse<Region>> {
    ensure_admin(user)?;
    let name = required(payload.name, "name")?;
    let slug = slug_or_derive(payload.slug.as_deref(), &name)?;
    ensure_slug_available::<Regions, _>(&state.orm, RegionCol::Slug, RegionCol::Id, &slug, None)
        .await?;

    let region = regions::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        slug: Set(slug),
        description: Set(payload.description),
        image: Set(payload.image),
        cultural_heritage: Set(payload.cultural_heritage.unwrap_or_default()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "region_create",
        "regions",
        serde_json::json!({ "region_id": region.id, "slug": region.slug }),
    )
    .await;

    Ok(ApiResponse::success(
        "Region created",
        region.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_region(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: RegionRequest,
) -> AppResult<ApiResponse<Region>> {
    ensure_admin(user)?;
    let existing = Regions::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let name = required(payload.name, "name")?;
    let slug = slug_or_derive(payload.slug.as_deref(), &name)?;
    ensure_slug_available::<Regions, _>(
        &state.orm,
        RegionCol::Slug,
        RegionCol::Id,
        &slug,
        Some(id),
    )
    .await?;

    let mut active: regions::ActiveModel = existing.into();
    active.name = Set(name);
    active.slug = Set(slug);
    active.description = Set(payload.description);
    active.image = Set(payload.image);
    if let Some(heritage) = payload.cultural_heritage {
        active.cultural_heritage = Set(heritage);
    }
    let region = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "region_update",
        "regions",
        serde_json::json!({ "region_id": region.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", region.into(), Some(Meta::empty())))
}

/// Cascades to the region's artisans, stories and gallery images; products
/// only lose their region link.
pub async fn delete_region(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Regions::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "region_delete",
        "regions",
        serde_json::json!({ "region_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub(crate) fn required(value: String, field: &str) -> AppResult<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(value)
}
