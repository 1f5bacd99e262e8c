use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    admin_site::{Fieldset, ModelAdmin, Prepopulated},
    dto::{
        auth::{LoginRequest, LoginResponse},
        catalog::{
            ActivityList, ArtisanList, ArtisanRequest, CategoryList, CategoryRequest,
            CreateProductRequest, ProductList, RegionList, RegionRequest, UpdateProductRequest,
        },
        content::{CreateStoryPostRequest, GalleryList, StoryList, StoryPostList, StoryRequest},
        favorites::{AddFavoriteRequest, FavoriteList},
        newsletters::{NewsletterList, SubscribeRequest},
        orders::{AddOrderItemRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest},
        sellers::{ActivityCount, ActivitySummary, SellerDetail, SellerList},
        users::{UserList, UserWithProfile},
    },
    entity::{
        orders::OrderStatus, product_activities::ActivityType, user_profiles::UserType,
    },
    models::{
        Artisan, Category, CulturalStory, Favorite, GalleryImage, Newsletter, Order, OrderItem,
        Product, ProductActivity, Region, Seller, SellerProduct, StoryPost, User, UserProfile,
    },
    response::{ApiResponse, Meta},
    routes::{
        artisans, auth, catalog, favorites, gallery, health, newsletters, orders, params,
        products, sellers, site, stories, users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        site::site_info,
        catalog::list_categories,
        catalog::get_category,
        catalog::create_category,
        catalog::update_category,
        catalog::delete_category,
        catalog::list_regions,
        catalog::get_region,
        catalog::create_region,
        catalog::update_region,
        catalog::delete_region,
        artisans::list_artisans,
        artisans::get_artisan,
        artisans::create_artisan,
        artisans::update_artisan,
        artisans::delete_artisan,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::list_product_activity,
        stories::list_stories,
        stories::get_story,
        stories::create_story,
        stories::update_story,
        stories::delete_story,
        stories::list_posts,
        stories::create_post,
        stories::delete_post,
        gallery::list_images,
        gallery::get_image,
        gallery::delete_image,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        orders::add_order_item,
        orders::remove_order_item,
        newsletters::list_subscribers,
        newsletters::subscribe,
        newsletters::unsubscribe,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::remove_favorite,
        sellers::list_sellers,
        sellers::get_seller,
        sellers::refresh_counters,
        sellers::list_activity,
        sellers::activity_summary,
        users::list_users,
        users::verify_seller
    ),
    components(
        schemas(
            User,
            UserProfile,
            UserType,
            Seller,
            SellerProduct,
            ProductActivity,
            ActivityType,
            Category,
            Region,
            Artisan,
            Product,
            CulturalStory,
            StoryPost,
            GalleryImage,
            Order,
            OrderItem,
            OrderStatus,
            Newsletter,
            Favorite,
            ModelAdmin,
            Fieldset,
            Prepopulated,
            site::SiteInfo,
            LoginRequest,
            LoginResponse,
            CategoryRequest,
            RegionRequest,
            ArtisanRequest,
            CreateProductRequest,
            UpdateProductRequest,
            StoryRequest,
            CreateStoryPostRequest,
            UpdateOrderStatusRequest,
            AddOrderItemRequest,
            AddFavoriteRequest,
            SubscribeRequest,
            CategoryList,
            RegionList,
            ArtisanList,
            ProductList,
            ActivityList,
            StoryList,
            StoryPostList,
            GalleryList,
            OrderList,
            OrderWithItems,
            NewsletterList,
            FavoriteList,
            SellerList,
            SellerDetail,
            ActivityCount,
            ActivitySummary,
            UserList,
            UserWithProfile,
            params::Pagination,
            params::SortOrder,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Admin", description = "Admin site configuration"),
        (name = "Catalog", description = "Categories and regions"),
        (name = "Artisans", description = "Artisan endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Stories", description = "Cultural stories and story posts"),
        (name = "Gallery", description = "Gallery image endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Newsletters", description = "Newsletter subscriptions"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Sellers", description = "Seller shops and activity"),
        (name = "Users", description = "Accounts and profiles"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_admin_resource_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/admin/site",
            "/api/admin/categories",
            "/api/admin/regions/{id}",
            "/api/admin/products/{id}/activity",
            "/api/admin/story-posts",
            "/api/admin/orders/{id}/items/{item_id}",
            "/api/admin/sellers/{id}/activity/summary",
            "/api/admin/users/{id}/verify-seller",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} is undocumented");
        }
    }
}
