use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::{
    orders::OrderStatus, product_activities::ActivityType, user_profiles::UserType,
};

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// `q` search plus paging, shared by resources without extra filters.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// Query-string structs keep paging fields inline: urlencoded numbers do not
// survive `#[serde(flatten)]`.
macro_rules! paged {
    ($($ty:ty),* $(,)?) => {
        $(impl $ty {
            pub fn pagination(&self) -> Pagination {
                Pagination {
                    page: self.page,
                    per_page: self.per_page,
                }
            }

            pub fn search(&self) -> Option<&str> {
                self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
            }
        })*
    };
}

paged!(
    SearchQuery,
    ArtisanQuery,
    ProductQuery,
    StoryQuery,
    StoryPostQuery,
    GalleryQuery,
    OrderListQuery,
    SellerQuery,
    UserQuery,
    ActivityQuery,
);

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArtisanQuery {
    pub q: Option<String>,
    pub featured: Option<bool>,
    pub region_id: Option<Uuid>,
    pub years_of_experience: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    pub q: Option<String>,
    pub category_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoryQuery {
    pub q: Option<String>,
    pub region_id: Option<Uuid>,
    pub published: Option<bool>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoryPostQuery {
    pub q: Option<String>,
    pub user_id: Option<Uuid>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GalleryQuery {
    pub q: Option<String>,
    pub featured: Option<bool>,
    pub artisan_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub q: Option<String>,
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SellerQuery {
    pub q: Option<String>,
    pub is_verified: Option<bool>,
    pub is_active: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    pub q: Option<String>,
    pub user_type: Option<UserType>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    pub q: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// ILIKE pattern for a `q` search term.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));
        let p = Pagination {
            page: Some(3),
            per_page: Some(500),
        };
        assert_eq!(p.normalize(), (3, 100, 200));
        let p = Pagination {
            page: Some(-4),
            per_page: Some(0),
        };
        assert_eq!(p.normalize(), (1, 1, 0));
    }

    #[test]
    fn huge_page_saturates_the_offset() {
        let p = Pagination {
            page: Some(i64::MAX),
            per_page: Some(100),
        };
        let (page, per_page, offset) = p.normalize();
        assert_eq!((page, per_page), (i64::MAX, 100));
        assert_eq!(offset, i64::MAX);
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = SearchQuery {
            q: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.search(), None);

        let query = ProductQuery {
            q: Some(" vase ".into()),
            ..Default::default()
        };
        assert_eq!(query.search(), Some("vase"));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("blue"), "%blue%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
