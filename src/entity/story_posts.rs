use sea_orm::entity::prelude::*;

pub const MAX_CONTENT_CHARS: usize = 280;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "story_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub mentioned_product_id: Option<Uuid>,
    pub mentioned_artisan_id: Option<Uuid>,
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
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::MentionedProductId",
        to = "super::products::Column::Id",
        on_delete = "SetNull"
    )]
    MentionedProduct,
    #[sea_orm(
        belongs_to = "super::artisans::Entity",
        from = "Column::MentionedArtisanId",
        to = "super::artisans::Column::Id",
        on_delete = "SetNull"
    )]
    MentionedArtisan,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
