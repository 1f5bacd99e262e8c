use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    audit,
    dto::users::{UserList, UserWithProfile},
    entity::{
        Sellers, UserProfiles, sellers,
        user_profiles::{self, UserType},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    routes::params::{UserQuery, like_pattern},
    state::AppState,
};

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    query: UserQuery,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(user_type) = query.user_type {
        condition = condition.add(user_profiles::Column::UserType.eq(user_type));
    }
    if let Some(term) = query.search() {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Users, UserCol::Username)).ilike(pattern.clone()))
                .add(Expr::col((Users, UserCol::Email)).ilike(pattern)),
        );
    }

    let finder = Users::find()
        .find_also_related(UserProfiles)
        .filter(condition)
        .order_by_asc(UserCol::Username);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(user, profile)| UserWithProfile {
            user: user.into(),
            profile: profile.map(Into::into),
        })
        .collect();

    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Mark a seller account as verified on both the profile and the shop.
pub async fn verify_seller(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<UserWithProfile>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;

    let (account, profile) = Users::find_by_id(id)
        .find_also_related(UserProfiles)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let profile = profile
        .ok_or_else(|| AppError::BadRequest(format!("user {id} has no profile")))?;
    if profile.user_type != UserType::Seller {
        return Err(AppError::BadRequest(format!("user {id} is not a seller")));
    }

    let now = Utc::now().fixed_offset();
    let mut active: user_profiles::ActiveModel = profile.into();
    active.seller_verified = Set(true);
    active.updated_at = Set(now);
    let profile = active.update(&txn).await?;

    let shops = Sellers::update_many()
        .col_expr(sellers::Column::IsVerified, Expr::value(true))
        .col_expr(sellers::Column::UpdatedAt, Expr::value(now))
        .filter(sellers::Column::UserId.eq(id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "seller_verify",
        "users",
        json!({ "user_id": id, "shops_verified": shops.rows_affected }),
    )
    .await;

    Ok(ApiResponse::success(
        "Seller verified",
        UserWithProfile {
            user: account.into(),
            profile: Some(profile.into()),
        },
        Some(Meta::empty()),
    ))
}
