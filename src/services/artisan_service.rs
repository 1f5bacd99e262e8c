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
    dto::catalog::{ArtisanList, ArtisanRequest},
    entity::{
        Regions,
        artisans::{self, Column as ArtisanCol, Entity as Artisans},
        regions,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Artisan,
    response::{ApiResponse, Meta},
    routes::params::{ArtisanQuery, like_pattern},
    services::{catalog_service::required, ensure_exists, ensure_slug_available},
    slug::slug_or_derive,
    state::AppState,
};

pub async fn list_artisans(
    state: &AppState,
    user: &AuthUser,
    query: ArtisanQuery,
) -> AppResult<ApiResponse<ArtisanList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(featured) = query.featured {
        condition = condition.add(ArtisanCol::Featured.eq(featured));
    }
    if let Some(region_id) = query.region_id {
        condition = condition.add(ArtisanCol::RegionId.eq(region_id));
    }
    if let Some(years) = query.years_of_experience {
        condition = condition.add(ArtisanCol::YearsOfExperience.eq(years));
    }
    if let Some(term) = query.search() {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Artisans, ArtisanCol::Name)).ilike(pattern.clone()))
                .add(Expr::col((Artisans, ArtisanCol::Specialty)).ilike(pattern.clone()))
                .add(Expr::col((Regions, regions::Column::Name)).ilike(pattern)),
        );
    }

    let finder = Artisans::find()
        .join(JoinType::LeftJoin, artisans::Relation::Regions.def())
        .filter(condition)
        .order_by_desc(ArtisanCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Artisan::from)
        .collect();

    Ok(ApiResponse::success(
        "Artisans",
        ArtisanList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_artisan(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Artisan>> {
    ensure_admin(user)?;
    let artisan = Artisans::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Artisan", artisan.into(), None))
}

fn validate_experience(years: i32) -> AppResult<()> {
    if years < 0 {
        return Err(AppError::BadRequest(
            "years_of_experience must not be negative".into(),
        ));
    }
    Ok(())
}

pub async fn create_artisan(
    state: &AppState,
    user: &AuthUser,
    payload: ArtisanRequest,
) -> AppResult<ApiResponse<Artisan>> {
    ensure_admin(user)?;
    let name = required(payload.name, "name")?;
    let slug = slug_or_derive(payload.slug.as_deref(), &name)?;
    ensure_slug_available::<Artisans, _>(&state.orm, ArtisanCol::Slug, ArtisanCol::Id, &slug, None)
        .await?;
    ensure_exists::<Regions, _>(&state.orm, payload.region_id, "region").await?;
    validate_experience(payload.years_of_experience)?;

    let artisan = artisans::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        slug: Set(slug),
        bio: Set(payload.bio),
        image: Set(payload.image),
        region_id: Set(payload.region_id),
        specialty: Set(payload.specialty),
        years_of_experience: Set(payload.years_of_experience),
        email: Set(payload.email.unwrap_or_default()),
        phone: Set(payload.phone.unwrap_or_default()),
        website: Set(payload.website.unwrap_or_default()),
        social_media_links: Set(payload.social_media_links.unwrap_or_else(|| json!({}))),
        featured: Set(payload.featured.unwrap_or(false)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "artisan_create",
        "artisans",
        json!({ "artisan_id": artisan.id, "slug": artisan.slug }),
    )
    .await;

    Ok(ApiResponse::success(
        "Artisan created",
        artisan.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_artisan(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ArtisanRequest,
) -> AppResult<ApiResponse<Artisan>> {
    ensure_admin(user)?;
    let existing = Artisans::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let name = required(payload.name, "name")?;
    let slug = slug_or_derive(payload.slug.as_deref(), &name)?;
    ensure_slug_available::<Artisans, _>(
        &state.orm,
        ArtisanCol::Slug,
        ArtisanCol::Id,
        &slug,
        Some(id),
    )
    .await?;
    ensure_exists::<Regions, _>(&state.orm, payload.region_id, "region").await?;
    validate_experience(payload.years_of_experience)?;

    let mut active: artisans::ActiveModel = existing.into();
    active.name = Set(name);
    active.slug = Set(slug);
    active.bio = Set(payload.bio);
    active.image = Set(payload.image);
    active.region_id = Set(payload.region_id);
    active.specialty = Set(payload.specialty);
    active.years_of_experience = Set(payload.years_of_experience);
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(website) = payload.website {
        active.website = Set(website);
    }
    if let Some(links) = payload.social_media_links {
        active.social_media_links = Set(links);
    }
    if let Some(featured) = payload.featured {
        active.featured = Set(featured);
    }
    active.updated_at = Set(chrono::Utc::now().fixed_offset());
    let artisan = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "artisan_update",
        "artisans",
        json!({ "artisan_id": artisan.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", artisan.into(), Some(Meta::empty())))
}

/// The artisan's products stay in the catalog unlinked. Gallery images go with it.
pub async fn delete_artisan(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Artisans::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "artisan_delete",
        "artisans",
        json!({ "artisan_id": id }),
    )
    .await;

    Ok(ApiResponse::success("Deleted", json!({}), Some(Meta::empty())))
}
