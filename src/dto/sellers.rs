use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    entity::product_activities::ActivityType,
    models::{Seller, SellerProduct},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SellerList {
    pub items: Vec<Seller>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SellerDetail {
    pub seller: Seller,
    pub listings: Vec<SellerProduct>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct ActivityCount {
    pub activity_type: ActivityType,
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivitySummary {
    pub total: i64,
    pub counts: Vec<ActivityCount>,
}
