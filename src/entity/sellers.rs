use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sellers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub shop_name: String,
    #[sea_orm(column_type = "Text")]
    pub shop_description: String,
    pub shop_logo: Option<String>,
    pub phone: String,
    /// Work location state or union territory.
    pub state: String,
    pub bank_account: String,
    pub bank_name: String,
    pub ifsc_code: String,
    pub total_products: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_sales: Decimal,
    pub rating: f64,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
    #[sea_orm(has_many = "super::seller_products::Entity")]
    SellerProducts,
    #[sea_orm(has_many = "super::product_activities::Entity")]
    ProductActivities,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::seller_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SellerProducts.def()
    }
}

impl Related<super::product_activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductActivities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
