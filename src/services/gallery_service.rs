use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    audit,
    dto::content::GalleryList,
    entity::gallery_images::{Column, Entity as GalleryImages},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::GalleryImage,
    response::{ApiResponse, Meta},
    routes::params::{GalleryQuery, like_pattern},
    state::AppState,
};

/// Featured images first, newest first within each group.
pub async fn list_images(
    state: &AppState,
    user: &AuthUser,
    query: GalleryQuery,
) -> AppResult<ApiResponse<GalleryList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(featured) = query.featured {
        condition = condition.add(Column::Featured.eq(featured));
    }
    if let Some(artisan_id) = query.artisan_id {
        condition = condition.add(Column::ArtisanId.eq(artisan_id));
    }
    if let Some(product_id) = query.product_id {
        condition = condition.add(Column::ProductId.eq(product_id));
    }
    if let Some(region_id) = query.region_id {
        condition = condition.add(Column::RegionId.eq(region_id));
    }
    if let Some(term) = query.search() {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Title).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    let finder = GalleryImages::find()
        .filter(condition)
        .order_by_desc(Column::Featured)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(GalleryImage::from)
        .collect();

    Ok(ApiResponse::success(
        "Gallery images",
        GalleryList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_image(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<GalleryImage>> {
    ensure_admin(user)?;
    let image = GalleryImages::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Gallery image", image.into(), None))
}

pub async fn delete_image(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = GalleryImages::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "gallery_delete",
        "gallery",
        json!({ "image_id": id }),
    )
    .await;

    Ok(ApiResponse::success("Deleted", json!({}), Some(Meta::empty())))
}
