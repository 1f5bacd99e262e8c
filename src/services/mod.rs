use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, PrimaryKeyTrait, QueryFilter};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub mod artisan_service;
pub mod auth_service;
pub mod catalog_service;
pub mod favorite_service;
pub mod gallery_service;
pub mod newsletter_service;
pub mod order_service;
pub mod product_service;
pub mod seller_service;
pub mod story_service;
pub mod user_service;

/// Reject a slug that is blank or already used by another row of `E`.
pub(crate) async fn ensure_slug_available<E, C>(
    db: &C,
    slug_col: E::Column,
    id_col: E::Column,
    slug: &str,
    exclude: Option<Uuid>,
) -> AppResult<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if slug.is_empty() {
        return Err(AppError::BadRequest("slug must not be empty".into()));
    }

    let mut condition = Condition::all().add(slug_col.eq(slug));
    if let Some(id) = exclude {
        condition = condition.add(id_col.ne(id));
    }

    if E::find().filter(condition).one(db).await?.is_some() {
        return Err(AppError::Conflict(format!("slug '{slug}' is already in use")));
    }
    Ok(())
}

/// Reject a foreign key that points at no row of `E`.
pub(crate) async fn ensure_exists<E, C>(db: &C, id: Uuid, what: &str) -> AppResult<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    C: ConnectionTrait,
{
    if E::find_by_id(id).one(db).await?.is_none() {
        return Err(AppError::BadRequest(format!("{what} {id} does not exist")));
    }
    Ok(())
}

/// Exclusive upper bound of a `NUMERIC(10, 2)` amount.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Reject an amount the money columns cannot hold.
pub(crate) fn ensure_amount_fits(field: &str, value: Decimal) -> AppResult<()> {
    if value >= MAX_AMOUNT {
        return Err(AppError::BadRequest(format!(
            "{field} must be less than {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// Stock flag kept in lockstep with the stock counter.
pub fn in_stock(stock: i32) -> bool {
    stock > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stock_is_out_of_stock() {
        assert!(in_stock(1));
        assert!(!in_stock(0));
        assert!(!in_stock(-3));
    }

    #[test]
    fn amounts_must_fit_ten_two() {
        assert!(ensure_amount_fits("total", Decimal::new(9_999_999_999, 2)).is_ok());
        assert!(matches!(
            ensure_amount_fits("total", MAX_AMOUNT),
            Err(AppError::BadRequest(_))
        ));
        assert!(ensure_amount_fits("total", Decimal::new(1_000_000_000, 0)).is_err());
    }
}
