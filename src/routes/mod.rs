use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod artisans;
pub mod auth;
pub mod catalog;
pub mod doc;
pub mod favorites;
pub mod gallery;
pub mod health;
pub mod newsletters;
pub mod orders;
pub mod params;
pub mod products;
pub mod sellers;
pub mod site;
pub mod stories;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
