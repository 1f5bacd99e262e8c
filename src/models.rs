use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    artisans, categories, cultural_stories, favorites, gallery_images, newsletters, order_items,
    orders::{self, OrderStatus},
    product_activities::{self, ActivityType},
    products, regions, seller_products, sellers, story_posts,
    user_profiles::{self, UserType},
    users,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_type: UserType,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub profile_image: Option<String>,
    pub terms_accepted_at: Option<DateTime<Utc>>,
    pub terms_version: String,
    pub seller_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user_profiles::Model> for UserProfile {
    fn from(model: user_profiles::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            user_type: model.user_type,
            phone: model.phone,
            address: model.address,
            city: model.city,
            state: model.state,
            pincode: model.pincode,
            profile_image: model.profile_image,
            terms_accepted_at: model.terms_accepted_at.map(|dt| dt.with_timezone(&Utc)),
            terms_version: model.terms_version,
            seller_verified: model.seller_verified,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Seller {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_name: String,
    pub shop_description: String,
    pub shop_logo: Option<String>,
    pub phone: String,
    pub state: String,
    pub bank_account: String,
    pub bank_name: String,
    pub ifsc_code: String,
    pub total_products: i32,
    pub total_sales: Decimal,
    pub rating: f64,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<sellers::Model> for Seller {
    fn from(model: sellers::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            shop_name: model.shop_name,
            shop_description: model.shop_description,
            shop_logo: model.shop_logo,
            phone: model.phone,
            state: model.state,
            bank_account: model.bank_account,
            bank_name: model.bank_name,
            ifsc_code: model.ifsc_code,
            total_products: model.total_products,
            total_sales: model.total_sales,
            rating: model.rating,
            is_verified: model.is_verified,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SellerProduct {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub product_id: Uuid,
    pub seller_sku: String,
    pub seller_price: Decimal,
    pub seller_stock: i32,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<seller_products::Model> for SellerProduct {
    fn from(model: seller_products::Model) -> Self {
        Self {
            id: model.id,
            seller_id: model.seller_id,
            product_id: model.product_id,
            seller_sku: model.seller_sku,
            seller_price: model.seller_price,
            seller_stock: model.seller_stock,
            added_at: model.added_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductActivity {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub product_id: Uuid,
    pub activity_type: ActivityType,
    pub activity_label: String,
    pub user_id: Option<Uuid>,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

impl From<product_activities::Model> for ProductActivity {
    fn from(model: product_activities::Model) -> Self {
        Self {
            id: model.id,
            seller_id: model.seller_id,
            product_id: model.product_id,
            activity_type: model.activity_type,
            activity_label: model.activity_type.label().to_string(),
            user_id: model.user_id,
            details: model.details,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            image: model.image,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Region {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub cultural_heritage: String,
    pub created_at: DateTime<Utc>,
}

impl From<regions::Model> for Region {
    fn from(model: regions::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            image: model.image,
            cultural_heritage: model.cultural_heritage,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Artisan {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub bio: String,
    pub image: String,
    pub region_id: Uuid,
    pub specialty: String,
    pub years_of_experience: i32,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub social_media_links: Value,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<artisans::Model> for Artisan {
    fn from(model: artisans::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            bio: model.bio,
            image: model.image,
            region_id: model.region_id,
            specialty: model.specialty,
            years_of_experience: model.years_of_experience,
            email: model.email,
            phone: model.phone,
            website: model.website,
            social_media_links: model.social_media_links,
            featured: model.featured,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub artisan_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub stock: i32,
    pub image: String,
    pub gallery_images: Value,
    pub featured: bool,
    pub in_stock: bool,
    pub rating: f64,
    pub reviews_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            category_id: model.category_id,
            region_id: model.region_id,
            artisan_id: model.artisan_id,
            seller_id: model.seller_id,
            price: model.price,
            original_price: model.original_price,
            stock: model.stock,
            image: model.image,
            gallery_images: model.gallery_images,
            featured: model.featured,
            in_stock: model.in_stock,
            rating: model.rating,
            reviews_count: model.reviews_count,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CulturalStory {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author: String,
    pub featured_image: String,
    pub region_id: Uuid,
    pub category: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<cultural_stories::Model> for CulturalStory {
    fn from(model: cultural_stories::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            author: model.author,
            featured_image: model.featured_image,
            region_id: model.region_id,
            category: model.category,
            published: model.published,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoryPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub mentioned_product_id: Option<Uuid>,
    pub mentioned_artisan_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<story_posts::Model> for StoryPost {
    fn from(model: story_posts::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            content: model.content,
            mentioned_product_id: model.mentioned_product_id,
            mentioned_artisan_id: model.mentioned_artisan_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GalleryImage {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub description: String,
    pub artisan_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<gallery_images::Model> for GalleryImage {
    fn from(model: gallery_images::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            image: model.image,
            description: model.description,
            artisan_id: model.artisan_id,
            product_id: model.product_id,
            region_id: model.region_id,
            featured: model.featured,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            total_amount: model.total_amount,
            status: model.status,
            shipping_address: model.shipping_address,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            quantity: model.quantity,
            price: model.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Newsletter {
    pub id: Uuid,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

impl From<newsletters::Model> for Newsletter {
    fn from(model: newsletters::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            subscribed_at: model.subscribed_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<favorites::Model> for Favorite {
    fn from(model: favorites::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
