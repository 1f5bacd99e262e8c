use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, Iterable,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        catalog::ActivityList,
        sellers::{ActivityCount, ActivitySummary, SellerDetail, SellerList},
    },
    entity::{
        SellerProducts,
        product_activities::{
            self, ActivityType, Column as ActivityCol, Entity as ProductActivities,
        },
        seller_products,
        sellers::{Column as SellerCol, Entity as Sellers},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{ProductActivity, Seller, SellerProduct},
    response::{ApiResponse, Meta},
    routes::params::{ActivityQuery, SellerQuery, like_pattern},
    state::AppState,
};

pub async fn list_sellers(
    state: &AppState,
    user: &AuthUser,
    query: SellerQuery,
) -> AppResult<ApiResponse<SellerList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(verified) = query.is_verified {
        condition = condition.add(SellerCol::IsVerified.eq(verified));
    }
    if let Some(active) = query.is_active {
        condition = condition.add(SellerCol::IsActive.eq(active));
    }
    if let Some(term) = query.search() {
        condition = condition.add(Expr::col(SellerCol::ShopName).ilike(like_pattern(term)));
    }

    let finder = Sellers::find()
        .filter(condition)
        .order_by_asc(SellerCol::ShopName);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Seller::from)
        .collect();

    Ok(ApiResponse::success(
        "Sellers",
        SellerList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_seller(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<SellerDetail>> {
    ensure_admin(user)?;
    let seller = Sellers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let listings = SellerProducts::find()
        .filter(seller_products::Column::SellerId.eq(seller.id))
        .order_by_desc(seller_products::Column::AddedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(SellerProduct::from)
        .collect();

    Ok(ApiResponse::success(
        "Seller",
        SellerDetail {
            seller: seller.into(),
            listings,
        },
        None,
    ))
}

/// Recompute the stored counters from products and order history.
/// Cancelled orders do not count towards sales.
pub async fn refresh_counters(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Seller>> {
    ensure_admin(user)?;
    let result = sqlx::query(
        r#"
        UPDATE sellers s
        SET total_products = (
                SELECT COUNT(*) FROM products p WHERE p.seller_id = s.id
            ),
            total_sales = COALESCE((
                SELECT SUM(oi.price * oi.quantity)
                FROM order_items oi
                JOIN orders o ON o.id = oi.order_id
                JOIN products p ON p.id = oi.product_id
                WHERE p.seller_id = s.id AND o.status <> 'cancelled'
            ), 0),
            updated_at = NOW()
        WHERE s.id = $1
        "#,
    )
    .bind(id)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    let seller = Sellers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    audit::record(
        &state.pool,
        user.user_id,
        "seller_refresh",
        "sellers",
        json!({
            "seller_id": seller.id,
            "total_products": seller.total_products,
            "total_sales": seller.total_sales,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Counters refreshed",
        seller.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_activity(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    query: ActivityQuery,
) -> AppResult<ApiResponse<ActivityList>> {
    ensure_admin(user)?;
    if Sellers::find_by_id(id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all().add(ActivityCol::SellerId.eq(id));
    if let Some(kind) = query.activity_type {
        condition = condition.add(ActivityCol::ActivityType.eq(kind));
    }

    let finder = ProductActivities::find()
        .filter(condition)
        .order_by_desc(ActivityCol::CreatedAt);

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
        "Seller activity",
        ActivityList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// One entry per activity type in declaration order, zero when absent.
pub fn summarize(rows: &[(ActivityType, i64)]) -> ActivitySummary {
    let found: HashMap<ActivityType, i64> = rows.iter().copied().collect();
    let counts: Vec<ActivityCount> = ActivityType::iter()
        .map(|kind| ActivityCount {
            activity_type: kind,
            label: kind.label().to_string(),
            count: found.get(&kind).copied().unwrap_or(0),
        })
        .collect();
    let total = counts.iter().map(|c| c.count).sum();
    ActivitySummary { total, counts }
}

pub async fn activity_summary(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ActivitySummary>> {
    ensure_admin(user)?;
    if Sellers::find_by_id(id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let rows: Vec<(ActivityType, i64)> = ProductActivities::find()
        .select_only()
        .column(ActivityCol::ActivityType)
        .column_as(Expr::col(ActivityCol::Id).count(), "count")
        .filter(ActivityCol::SellerId.eq(id))
        .group_by(ActivityCol::ActivityType)
        .into_tuple()
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success("Activity summary", summarize(&rows), None))
}

/// Append one event to a seller's activity log.
pub async fn record_activity<C: ConnectionTrait>(
    db: &C,
    seller_id: Uuid,
    product_id: Uuid,
    activity_type: ActivityType,
    user_id: Option<Uuid>,
    details: Value,
) -> AppResult<product_activities::Model> {
    let event = product_activities::ActiveModel {
        id: Set(Uuid::new_v4()),
        seller_id: Set(seller_id),
        product_id: Set(product_id),
        activity_type: Set(activity_type),
        user_id: Set(user_id),
        details: Set(details),
        created_at: sea_orm::ActiveValue::NotSet,
    }
    .insert(db)
    .await?;
    tracing::debug!(
        seller_id = %seller_id,
        product_id = %product_id,
        activity = activity_type.label(),
        "activity recorded"
    );
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_fills_missing_types_with_zero() {
        let summary = summarize(&[(ActivityType::View, 4), (ActivityType::Purchase, 2)]);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.counts.len(), 5);
        assert_eq!(summary.counts[0].activity_type, ActivityType::View);
        assert_eq!(summary.counts[0].count, 4);
        assert_eq!(summary.counts[0].label, "Product Viewed");
        let review = summary
            .counts
            .iter()
            .find(|c| c.activity_type == ActivityType::Review)
            .unwrap();
        assert_eq!(review.count, 0);
    }

    #[test]
    fn empty_log_summarizes_to_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.counts.iter().all(|c| c.count == 0));
    }
}
