use uuid::Uuid;

use crate::{
    audit,
    db::DbPool,
    dto::newsletters::{NewsletterList, SubscribeRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Newsletter,
    response::{ApiResponse, Meta},
    routes::params::{SearchQuery, like_pattern},
};

const MAX_EMAIL_LEN: usize = 254;

/// Trim the address and lowercase its domain. Rejects anything that is not
/// a single `local@domain.tld` without whitespace.
pub fn validate_email(raw: &str) -> AppResult<String> {
    let email = raw.trim();
    let invalid = || AppError::BadRequest(format!("'{email}' is not a valid email address"));

    if email.is_empty() || email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(format!("{local}@{}", domain.to_ascii_lowercase()))
}

pub async fn list_subscribers(
    pool: &DbPool,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<NewsletterList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let pattern = query.search().map(like_pattern);

    let items = sqlx::query_as::<_, Newsletter>(
        r#"
        SELECT id, email, subscribed_at
        FROM newsletters
        WHERE $1::TEXT IS NULL OR email ILIKE $1
        ORDER BY subscribed_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern.as_deref())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM newsletters WHERE $1::TEXT IS NULL OR email ILIKE $1")
            .bind(pattern.as_deref())
            .fetch_one(pool)
            .await?;

    Ok(ApiResponse::success(
        "Subscribers",
        NewsletterList { items },
        Some(Meta::new(page, limit, total.0)),
    ))
}

/// Subscribing an address twice returns the original subscription.
pub async fn subscribe(
    pool: &DbPool,
    user: &AuthUser,
    payload: SubscribeRequest,
) -> AppResult<ApiResponse<Newsletter>> {
    ensure_admin(user)?;
    let email = validate_email(&payload.email)?;

    let inserted = sqlx::query_as::<_, Newsletter>(
        r#"
        INSERT INTO newsletters (id, email)
        VALUES ($1, $2)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, email, subscribed_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .fetch_optional(pool)
    .await?;

    let created = inserted.is_some();
    let subscription = match inserted {
        Some(row) => row,
        None => {
            sqlx::query_as::<_, Newsletter>(
                "SELECT id, email, subscribed_at FROM newsletters WHERE email = $1",
            )
            .bind(&email)
            .fetch_one(pool)
            .await?
        }
    };

    if created {
        audit::record(
            pool,
            user.user_id,
            "newsletter_subscribe",
            "newsletters",
            serde_json::json!({ "subscription_id": subscription.id }),
        )
        .await;
    }

    Ok(ApiResponse::success(
        if created { "Subscribed" } else { "Already subscribed" },
        subscription,
        Some(Meta::empty()),
    ))
}

pub async fn unsubscribe(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = sqlx::query("DELETE FROM newsletters WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        pool,
        user.user_id,
        "newsletter_unsubscribe",
        "newsletters",
        serde_json::json!({ "subscription_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Unsubscribed",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes_addresses() {
        assert_eq!(
            validate_email("  Asha.Rao@Example.IN ").unwrap(),
            "Asha.Rao@example.in"
        );
        assert!(validate_email("subscriber@kalakriti.in").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "no-at-sign", "@example.com", "a@b", "a@@b.com", "a b@c.com", "a@.com"] {
            assert!(
                matches!(validate_email(bad), Err(AppError::BadRequest(_))),
                "{bad} should be rejected"
            );
        }
    }
}
