use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{AddOrderItemRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest},
    entity::{
        Products, Users,
        order_items::{self, Column as ItemCol, Entity as OrderItems},
        orders::{self, Column as OrderCol, Entity as Orders, OrderStatus},
        users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder, like_pattern},
    services::ensure_amount_fits,
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }
    if let Some(term) = query.search() {
        let mut any = Condition::any()
            .add(Expr::col((Users, users::Column::Email)).ilike(like_pattern(term)));
        if let Ok(id) = Uuid::parse_str(term) {
            any = any.add(Expr::col((Orders, OrderCol::Id)).eq(id));
        }
        condition = condition.add(any);
    }

    let mut finder = Orders::find()
        .join(JoinType::LeftJoin, orders::Relation::Users.def())
        .filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

async fn load_items<C: ConnectionTrait>(
    db: &C,
    order_id: Uuid,
) -> AppResult<Vec<order_items::Model>> {
    Ok(OrderItems::find()
        .filter(ItemCol::OrderId.eq(order_id))
        .order_by_asc(ItemCol::Id)
        .all(db)
        .await?)
}

fn with_items(order: orders::Model, items: Vec<order_items::Model>) -> OrderWithItems {
    OrderWithItems::new(
        Order::from(order),
        items.into_iter().map(OrderItem::from).collect(),
    )
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let items = load_items(&state.orm, order.id).await?;

    Ok(ApiResponse::success("Order", with_items(order, items), None))
}

pub async fn update_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let status = OrderStatus::parse(payload.status.trim()).ok_or_else(|| {
        AppError::BadRequest(format!("unknown order status '{}'", payload.status))
    })?;

    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let previous = order.status;

    let mut active: orders::ActiveModel = order.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().fixed_offset());
    let order = active.update(&state.orm).await?;
    let items = load_items(&state.orm, order.id).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "order_status_update",
        "orders",
        json!({ "order_id": order.id, "from": previous, "to": status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Status updated",
        with_items(order, items),
        Some(Meta::empty()),
    ))
}

/// Sum of quantity times snapshot price over every line.
pub fn order_total(items: &[order_items::Model]) -> Decimal {
    items.iter().map(order_items::Model::line_total).sum()
}

async fn recompute_total<C: ConnectionTrait>(
    db: &C,
    order: orders::Model,
) -> AppResult<(orders::Model, Vec<order_items::Model>)> {
    let items = load_items(db, order.id).await?;
    let total = order_total(&items);
    ensure_amount_fits("order total", total)?;
    let mut active: orders::ActiveModel = order.into();
    active.total_amount = Set(total);
    active.updated_at = Set(Utc::now().fixed_offset());
    let order = active.update(db).await?;
    Ok((order, items))
}

/// Add a line priced at the product's current price and refresh the order total.
pub async fn add_item(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    payload: AddOrderItemRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".into()));
    }

    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let product = Products::find_by_id(payload.product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("product {} does not exist", payload.product_id))
        })?;

    let item = order_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        product_id: Set(product.id),
        quantity: Set(payload.quantity),
        price: Set(product.price),
    }
    .insert(&txn)
    .await?;

    let (order, items) = recompute_total(&txn, order).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "order_item_add",
        "orders",
        json!({ "order_id": order.id, "item_id": item.id, "price": item.price }),
    )
    .await;

    Ok(ApiResponse::success(
        "Item added",
        with_items(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn remove_item(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    item_id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let result = OrderItems::delete_many()
        .filter(
            Condition::all()
                .add(ItemCol::Id.eq(item_id))
                .add(ItemCol::OrderId.eq(order.id)),
        )
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    let (order, items) = recompute_total(&txn, order).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "order_item_remove",
        "orders",
        json!({ "order_id": order.id, "item_id": item_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Item removed",
        with_items(order, items),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i32, price: i64) -> order_items::Model {
        order_items::Model {
            id: Uuid::new_v4(),
            order_id: Uuid::nil(),
            product_id: Uuid::new_v4(),
            quantity,
            price: Decimal::new(price, 2),
        }
    }

    #[test]
    fn total_sums_snapshot_line_totals() {
        let items = vec![line(1, 249_900), line(1, 189_900)];
        assert_eq!(order_total(&items), Decimal::new(439_800, 2));
        assert_eq!(order_total(&[line(1, 279_900)]), Decimal::new(279_900, 2));
    }

    #[test]
    fn empty_order_totals_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }
}
