use axum::Router;

use crate::{
    routes::{
        artisans, catalog, favorites, gallery, newsletters, orders, products, sellers, site,
        stories, users,
    },
    state::AppState,
};

/// Every admin resource, mounted under `/api/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/site", site::router())
        .nest("/categories", catalog::categories_router())
        .nest("/regions", catalog::regions_router())
        .nest("/artisans", artisans::router())
        .nest("/products", products::router())
        .nest("/stories", stories::stories_router())
        .nest("/story-posts", stories::posts_router())
        .nest("/gallery", gallery::router())
        .nest("/orders", orders::router())
        .nest("/newsletters", newsletters::router())
        .nest("/favorites", favorites::router())
        .nest("/sellers", sellers::router())
        .nest("/users", users::router())
}
