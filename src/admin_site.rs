//! Admin display configuration.
//!
//! Each registered model carries the columns shown in list views, the
//! fields matched by `q`, the query filters it accepts, read-only fields,
//! the field whose slug is derived from another, and optional grouping of
//! detail fields.

use serde::Serialize;
use utoipa::ToSchema;

pub const SITE_HEADER: &str = "KalaKriti Administration";
pub const SITE_TITLE: &str = "KalaKriti Admin";
pub const INDEX_TITLE: &str = "Welcome to KalaKriti Admin";

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct Fieldset {
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = Vec<String>)]
    pub fields: &'static [&'static str],
    pub collapsed: bool,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct Prepopulated {
    #[schema(value_type = String)]
    pub field: &'static str,
    #[schema(value_type = String)]
    pub from: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ModelAdmin {
    /// Path segment under `/api/admin`.
    #[schema(value_type = String)]
    pub resource: &'static str,
    #[schema(value_type = String)]
    pub verbose_name_plural: &'static str,
    #[schema(value_type = Vec<String>)]
    pub list_display: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub search_fields: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub list_filter: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub readonly_fields: &'static [&'static str],
    pub prepopulated: Option<Prepopulated>,
    #[schema(value_type = Vec<Fieldset>)]
    pub fieldsets: &'static [Fieldset],
    /// Child rows edited alongside the parent.
    #[schema(value_type = Option<String>)]
    pub inline: Option<&'static str>,
}

const NO_FIELDSETS: &[Fieldset] = &[];

const TIMESTAMPS: Fieldset = Fieldset {
    name: "Timestamps",
    fields: &["created_at", "updated_at"],
    collapsed: true,
};

pub const REGISTRY: &[ModelAdmin] = &[
    ModelAdmin {
        resource: "categories",
        verbose_name_plural: "Categories",
        list_display: &["name", "slug", "created_at"],
        search_fields: &["name"],
        list_filter: &["created_at"],
        readonly_fields: &[],
        prepopulated: Some(Prepopulated { field: "slug", from: "name" }),
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
    ModelAdmin {
        resource: "regions",
        verbose_name_plural: "Regions",
        list_display: &["name", "slug", "created_at"],
        search_fields: &["name"],
        list_filter: &["created_at"],
        readonly_fields: &[],
        prepopulated: Some(Prepopulated { field: "slug", from: "name" }),
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
    ModelAdmin {
        resource: "artisans",
        verbose_name_plural: "Artisans",
        list_display: &["name", "region", "specialty", "featured", "created_at"],
        search_fields: &["name", "specialty", "region__name"],
        list_filter: &["featured", "region", "created_at", "years_of_experience"],
        readonly_fields: &["created_at", "updated_at"],
        prepopulated: Some(Prepopulated { field: "slug", from: "name" }),
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
    ModelAdmin {
        resource: "products",
        verbose_name_plural: "Products",
        list_display: &["name", "category", "artisan", "price", "in_stock", "featured", "created_at"],
        search_fields: &["name", "category__name", "artisan__name"],
        list_filter: &["category", "region", "featured", "in_stock", "created_at"],
        readonly_fields: &["created_at", "updated_at"],
        prepopulated: Some(Prepopulated { field: "slug", from: "name" }),
        fieldsets: &[
            Fieldset {
                name: "Basic Information",
                fields: &["name", "slug", "description"],
                collapsed: false,
            },
            Fieldset {
                name: "Classification",
                fields: &["category", "region", "artisan"],
                collapsed: false,
            },
            Fieldset {
                name: "Pricing",
                fields: &["price", "original_price"],
                collapsed: false,
            },
            Fieldset {
                name: "Stock",
                fields: &["stock", "in_stock"],
                collapsed: false,
            },
            Fieldset {
                name: "Media",
                fields: &["image", "gallery_images"],
                collapsed: false,
            },
            Fieldset {
                name: "Promotion",
                fields: &["featured"],
                collapsed: false,
            },
            Fieldset {
                name: "Reviews",
                fields: &["rating", "reviews_count"],
                collapsed: false,
            },
            TIMESTAMPS,
        ],
        inline: None,
    },
    ModelAdmin {
        resource: "stories",
        verbose_name_plural: "Cultural Stories",
        list_display: &["title", "region", "category", "published", "created_at"],
        search_fields: &["title", "content", "region__name"],
        list_filter: &["region", "published", "category", "created_at"],
        readonly_fields: &["created_at", "updated_at"],
        prepopulated: Some(Prepopulated { field: "slug", from: "title" }),
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
    ModelAdmin {
        resource: "story-posts",
        verbose_name_plural: "Story Posts",
        list_display: &["user", "content", "created_at"],
        search_fields: &["content"],
        list_filter: &["user"],
        readonly_fields: &["created_at", "updated_at"],
        prepopulated: None,
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
    ModelAdmin {
        resource: "gallery",
        verbose_name_plural: "Gallery Images",
        list_display: &["title", "artisan", "product", "region", "featured", "created_at"],
        search_fields: &["title", "description"],
        list_filter: &["featured", "created_at", "artisan", "product", "region"],
        readonly_fields: &["created_at"],
        prepopulated: None,
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
    ModelAdmin {
        resource: "orders",
        verbose_name_plural: "Orders",
        list_display: &["id", "user", "total_amount", "status", "created_at"],
        search_fields: &["user__email", "id"],
        list_filter: &["status", "created_at"],
        readonly_fields: &["created_at", "updated_at", "id"],
        prepopulated: None,
        fieldsets: &[
            Fieldset {
                name: "Order Information",
                fields: &["id", "user", "status"],
                collapsed: false,
            },
            Fieldset {
                name: "Financial",
                fields: &["total_amount"],
                collapsed: false,
            },
            Fieldset {
                name: "Shipping",
                fields: &["shipping_address"],
                collapsed: false,
            },
            TIMESTAMPS,
        ],
        inline: Some("order_items"),
    },
    ModelAdmin {
        resource: "newsletters",
        verbose_name_plural: "Newsletters",
        list_display: &["email", "subscribed_at"],
        search_fields: &["email"],
        list_filter: &["subscribed_at"],
        readonly_fields: &["subscribed_at"],
        prepopulated: None,
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
    ModelAdmin {
        resource: "favorites",
        verbose_name_plural: "Favorites",
        list_display: &["user", "product", "created_at"],
        search_fields: &["user__email", "product__name"],
        list_filter: &["created_at"],
        readonly_fields: &["created_at"],
        prepopulated: None,
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
    ModelAdmin {
        resource: "sellers",
        verbose_name_plural: "Sellers",
        list_display: &["shop_name", "state", "total_products", "total_sales", "rating", "is_verified"],
        search_fields: &["shop_name"],
        list_filter: &["is_verified", "is_active"],
        readonly_fields: &["total_products", "total_sales", "created_at", "updated_at"],
        prepopulated: None,
        fieldsets: NO_FIELDSETS,
        inline: Some("seller_products"),
    },
    ModelAdmin {
        resource: "users",
        verbose_name_plural: "User Profiles",
        list_display: &["username", "email", "user_type", "seller_verified"],
        search_fields: &["username", "email"],
        list_filter: &["user_type"],
        readonly_fields: &["created_at"],
        prepopulated: None,
        fieldsets: NO_FIELDSETS,
        inline: None,
    },
];

pub fn find(resource: &str) -> Option<&'static ModelAdmin> {
    REGISTRY.iter().find(|admin| admin.resource == resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn resources_are_unique() {
        let mut seen = HashSet::new();
        for admin in REGISTRY {
            assert!(seen.insert(admin.resource), "duplicate {}", admin.resource);
        }
    }

    #[test]
    fn fieldset_fields_are_not_repeated() {
        for admin in REGISTRY {
            let mut seen = HashSet::new();
            for set in admin.fieldsets {
                for field in set.fields {
                    assert!(seen.insert(*field), "{} lists {field} twice", admin.resource);
                }
            }
        }
    }

    #[test]
    fn prepopulated_slugs_follow_display_names() {
        let product = find("products").expect("products registered");
        let pre = product.prepopulated.expect("product slug is prepopulated");
        assert_eq!((pre.field, pre.from), ("slug", "name"));

        let story = find("stories").expect("stories registered");
        assert_eq!(story.prepopulated.map(|p| p.from), Some("title"));
        assert!(find("newsletters").and_then(|n| n.prepopulated).is_none());
    }

    #[test]
    fn orders_edit_items_inline() {
        assert_eq!(find("orders").and_then(|o| o.inline), Some("order_items"));
        assert!(find("carts").is_none());
    }
}
