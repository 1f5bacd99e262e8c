use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Artisan, Category, Product, ProductActivity, Region};

/// Create or update payload for categories. `slug` falls back to the name.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegionRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub image: String,
    pub cultural_heritage: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ArtisanRequest {
    pub name: String,
    pub slug: Option<String>,
    pub bio: String,
    pub image: String,
    pub region_id: Uuid,
    pub specialty: String,
    pub years_of_experience: i32,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub social_media_links: Option<Value>,
    pub featured: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub artisan_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub stock: i32,
    pub image: String,
    pub gallery_images: Option<Vec<String>>,
    pub featured: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub artisan_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub gallery_images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegionList {
    pub items: Vec<Region>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtisanList {
    pub items: Vec<Artisan>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityList {
    pub items: Vec<ProductActivity>,
}
