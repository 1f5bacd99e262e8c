use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    audit,
    dto::catalog::{ActivityList, CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        Artisans, Categories, ProductActivities, Regions, Sellers, artisans, categories,
        product_activities,
        products::{self, Column, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Product, ProductActivity},
    response::{ApiResponse, Meta},
    routes::params::{ActivityQuery, ProductQuery, like_pattern},
    services::{
        catalog_service::required, ensure_amount_fits, ensure_exists, ensure_slug_available,
        in_stock,
    },
    slug::{explicit_slug, slug_or_derive},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(term) = query.search() {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Products, Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((Categories, categories::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((Artisans, artisans::Column::Name)).ilike(pattern)),
        );
    }
    if let Some(category_id) = query.category_id {
        condition = condition.add(Column::CategoryId.eq(category_id));
    }
    if let Some(region_id) = query.region_id {
        condition = condition.add(Column::RegionId.eq(region_id));
    }
    if let Some(featured) = query.featured {
        condition = condition.add(Column::Featured.eq(featured));
    }
    if let Some(available) = query.in_stock {
        condition = condition.add(Column::InStock.eq(available));
    }

    let finder = Products::find()
        .join(JoinType::LeftJoin, products::Relation::Categories.def())
        .join(JoinType::LeftJoin, products::Relation::Artisans.def())
        .filter(condition)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product.into(), None))
}

fn validate_money(field: &str, value: Decimal) -> AppResult<()> {
    if value.is_sign_negative() {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    if value.scale() > 2 {
        return Err(AppError::BadRequest(format!(
            "{field} must have at most two decimal places"
        )));
    }
    ensure_amount_fits(field, value)
}

fn validate_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::BadRequest("stock must not be negative".into()));
    }
    Ok(())
}

async fn ensure_links<C: ConnectionTrait>(
    db: &C,
    category_id: Option<Uuid>,
    region_id: Option<Uuid>,
    artisan_id: Option<Uuid>,
    seller_id: Option<Uuid>,
) -> AppResult<()> {
    if let Some(id) = category_id {
        ensure_exists::<Categories, _>(db, id, "category").await?;
    }
    if let Some(id) = region_id {
        ensure_exists::<Regions, _>(db, id, "region").await?;
    }
    if let Some(id) = artisan_id {
        ensure_exists::<Artisans, _>(db, id, "artisan").await?;
    }
    if let Some(id) = seller_id {
        ensure_exists::<Sellers, _>(db, id, "seller").await?;
    }
    Ok(())
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let name = required(payload.name, "name")?;
    let slug = slug_or_derive(payload.slug.as_deref(), &name)?;
    ensure_slug_available::<Products, _>(&state.orm, Column::Slug, Column::Id, &slug, None)
        .await?;
    validate_money("price", payload.price)?;
    if let Some(original) = payload.original_price {
        validate_money("original_price", original)?;
    }
    validate_stock(payload.stock)?;
    ensure_links(
        &state.orm,
        payload.category_id,
        payload.region_id,
        payload.artisan_id,
        payload.seller_id,
    )
    .await?;

    let product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        slug: Set(slug),
        description: Set(payload.description),
        category_id: Set(payload.category_id),
        region_id: Set(payload.region_id),
        artisan_id: Set(payload.artisan_id),
        seller_id: Set(payload.seller_id),
        price: Set(payload.price),
        original_price: Set(payload.original_price),
        stock: Set(payload.stock),
        image: Set(payload.image),
        gallery_images: Set(json!(payload.gallery_images.unwrap_or_default())),
        featured: Set(payload.featured.unwrap_or(false)),
        in_stock: Set(in_stock(payload.stock)),
        rating: Set(0.0),
        reviews_count: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "product_create",
        "products",
        json!({ "product_id": product.id, "slug": product.slug }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Partial update. Order items keep the price they were sold at.
pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    ensure_links(
        &state.orm,
        payload.category_id,
        payload.region_id,
        payload.artisan_id,
        payload.seller_id,
    )
    .await?;

    let mut active: products::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required(name, "name")?);
    }
    if let Some(slug) = payload.slug {
        let slug = explicit_slug(&slug)?;
        ensure_slug_available::<Products, _>(&state.orm, Column::Slug, Column::Id, &slug, Some(id))
            .await?;
        active.slug = Set(slug);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(Some(category_id));
    }
    if let Some(region_id) = payload.region_id {
        active.region_id = Set(Some(region_id));
    }
    if let Some(artisan_id) = payload.artisan_id {
        active.artisan_id = Set(Some(artisan_id));
    }
    if let Some(seller_id) = payload.seller_id {
        active.seller_id = Set(Some(seller_id));
    }
    if let Some(price) = payload.price {
        validate_money("price", price)?;
        active.price = Set(price);
    }
    if let Some(original) = payload.original_price {
        validate_money("original_price", original)?;
        active.original_price = Set(Some(original));
    }
    if let Some(stock) = payload.stock {
        validate_stock(stock)?;
        active.stock = Set(stock);
        active.in_stock = Set(in_stock(stock));
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(gallery) = payload.gallery_images {
        active.gallery_images = Set(json!(gallery));
    }
    if let Some(featured) = payload.featured {
        active.featured = Set(featured);
    }
    if let Some(rating) = payload.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(AppError::BadRequest("rating must be between 0 and 5".into()));
        }
        active.rating = Set(rating);
    }
    if let Some(reviews) = payload.reviews_count {
        if reviews < 0 {
            return Err(AppError::BadRequest(
                "reviews_count must not be negative".into(),
            ));
        }
        active.reviews_count = Set(reviews);
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "product_update",
        "products",
        json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Removes the product together with its order lines, listings, activity,
/// favorites and gallery rows.
pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "product_delete",
        "products",
        json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_product_activity(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    query: ActivityQuery,
) -> AppResult<ApiResponse<ActivityList>> {
    ensure_admin(user)?;
    ensure_exists::<Products, _>(&state.orm, id, "product")
        .await
        .map_err(|_| AppError::NotFound)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all().add(product_activities::Column::ProductId.eq(id));
    if let Some(kind) = query.activity_type {
        condition = condition.add(product_activities::Column::ActivityType.eq(kind));
    }

    let finder = ProductActivities::find()
        .filter(condition)
        .order_by_desc(product_activities::Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ProductActivity::from)
        .collect();

    Ok(ApiResponse::success(
        "Product activity",
        ActivityList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn money_rejects_negatives_and_fractions_of_paise() {
        assert!(validate_money("price", Decimal::from_str("2499.00").unwrap()).is_ok());
        assert!(validate_money("price", Decimal::ZERO).is_ok());
        assert!(matches!(
            validate_money("price", Decimal::from_str("-1").unwrap()),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_money("price", Decimal::from_str("1.999").unwrap()),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_money("price", Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(matches!(
            validate_money("price", Decimal::from(1_000_000_000)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn negative_stock_is_rejected() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
    }
}
