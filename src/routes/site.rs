use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    admin_site::{self, INDEX_TITLE, ModelAdmin, SITE_HEADER, SITE_TITLE},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SiteInfo {
    pub site_header: String,
    pub site_title: String,
    pub index_title: String,
    pub models: Vec<ModelAdmin>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(site_info))
}

#[utoipa::path(
    get,
    path = "/api/admin/site",
    responses(
        (status = 200, description = "Admin branding and model registry", body = ApiResponse<SiteInfo>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn site_info(user: AuthUser) -> AppResult<Json<ApiResponse<SiteInfo>>> {
    ensure_admin(&user)?;
    let data = SiteInfo {
        site_header: SITE_HEADER.to_string(),
        site_title: SITE_TITLE.to_string(),
        index_title: INDEX_TITLE.to_string(),
        models: admin_site::REGISTRY.to_vec(),
    };
    Ok(Json(ApiResponse::success("Site", data, None)))
}
