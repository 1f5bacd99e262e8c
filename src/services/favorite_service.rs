use uuid::Uuid;

use crate::{
    audit,
    db::DbPool,
    dto::favorites::{AddFavoriteRequest, FavoriteList},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Favorite,
    response::{ApiResponse, Meta},
    routes::params::{SearchQuery, like_pattern},
};

/// Favorites matched by owner email or product name.
pub async fn list_favorites(
    pool: &DbPool,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<FavoriteList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let pattern = query.search().map(like_pattern);

    let items = sqlx::query_as::<_, Favorite>(
        r#"
        SELECT f.id, f.user_id, f.product_id, f.created_at
        FROM favorites f
        JOIN users u ON u.id = f.user_id
        JOIN products p ON p.id = f.product_id
        WHERE $1::TEXT IS NULL OR u.email ILIKE $1 OR p.name ILIKE $1
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern.as_deref())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM favorites f
        JOIN users u ON u.id = f.user_id
        JOIN products p ON p.id = f.product_id
        WHERE $1::TEXT IS NULL OR u.email ILIKE $1 OR p.name ILIKE $1
        "#,
    )
    .bind(pattern.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(ApiResponse::success(
        "Favorites",
        FavoriteList { items },
        Some(Meta::new(page, limit, total.0)),
    ))
}

/// Returns the existing row when the pair is already favorited.
pub async fn add_favorite(
    pool: &DbPool,
    user: &AuthUser,
    payload: AddFavoriteRequest,
) -> AppResult<ApiResponse<Favorite>> {
    ensure_admin(user)?;
    let user_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
        .bind(payload.user_id)
        .fetch_optional(pool)
        .await?;
    if user_exists.is_none() {
        return Err(AppError::BadRequest("User not found".into()));
    }

    let product_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(payload.product_id)
        .fetch_optional(pool)
        .await?;
    if product_exists.is_none() {
        return Err(AppError::BadRequest("Product not found".into()));
    }

    let inserted = sqlx::query_as::<_, Favorite>(
        r#"
        INSERT INTO favorites (id, user_id, product_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, product_id) DO NOTHING
        RETURNING id, user_id, product_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.user_id)
    .bind(payload.product_id)
    .fetch_optional(pool)
    .await?;

    let (favorite, created) = match inserted {
        Some(fav) => (fav, true),
        None => {
            let fav = sqlx::query_as::<_, Favorite>(
                r#"
                SELECT id, user_id, product_id, created_at
                FROM favorites
                WHERE user_id = $1 AND product_id = $2
                "#,
            )
            .bind(payload.user_id)
            .bind(payload.product_id)
            .fetch_one(pool)
            .await?;
            (fav, false)
        }
    };

    if created {
        audit::record(
            pool,
            user.user_id,
            "favorite_add",
            "favorites",
            serde_json::json!({
                "favorite_id": favorite.id,
                "user_id": favorite.user_id,
                "product_id": favorite.product_id,
            }),
        )
        .await;
    }

    Ok(ApiResponse::success(
        if created { "Added to favorites" } else { "Already a favorite" },
        favorite,
        Some(Meta::empty()),
    ))
}

pub async fn remove_favorite(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = sqlx::query("DELETE FROM favorites WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        pool,
        user.user_id,
        "favorite_remove",
        "favorites",
        serde_json::json!({ "favorite_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from favorites",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
