use async_trait::async_trait;
use sea_orm::entity::prelude::*;

/// Line of an order. `price` is the product price captured when the line
/// was created and never follows later product price changes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

impl Model {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_delete = "Cascade"
    )]
    Orders,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "Cascade"
    )]
    Products,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

/// A stored line may change quantity but never its snapshot price.
pub fn check_price_fixed(active: &ActiveModel, insert: bool) -> Result<(), DbErr> {
    if !insert && active.price.is_set() {
        return Err(DbErr::Custom(
            "order item price is fixed once the item exists".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        check_price_fixed(&self, insert)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveValue::Set, IntoActiveModel};

    fn item() -> Model {
        Model {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            quantity: 2,
            price: Decimal::new(249900, 2),
        }
    }

    #[test]
    fn line_total_multiplies_snapshot_price() {
        assert_eq!(item().line_total(), Decimal::new(499800, 2));
    }

    #[test]
    fn updating_price_is_rejected() {
        let mut active = item().into_active_model();
        active.price = Set(Decimal::new(100, 0));

        let err = check_price_fixed(&active, false).unwrap_err();
        assert!(matches!(err, DbErr::Custom(_)));
    }

    #[test]
    fn quantity_changes_and_inserts_pass() {
        let mut active = item().into_active_model();
        active.quantity = Set(3);
        assert!(check_price_fixed(&active, false).is_ok());

        let fresh = ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(Uuid::new_v4()),
            product_id: Set(Uuid::new_v4()),
            quantity: Set(1),
            price: Set(Decimal::new(129900, 2)),
        };
        assert!(check_price_fixed(&fresh, true).is_ok());
    }
}
