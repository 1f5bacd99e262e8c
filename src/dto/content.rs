use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{CulturalStory, GalleryImage, StoryPost};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StoryRequest {
    pub title: String,
    pub slug: Option<String>,
    pub content: String,
    pub author: Option<String>,
    pub featured_image: String,
    pub region_id: Uuid,
    pub category: Option<String>,
    pub published: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateStoryPostRequest {
    pub user_id: Uuid,
    pub content: String,
    pub mentioned_product_id: Option<Uuid>,
    pub mentioned_artisan_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoryList {
    pub items: Vec<CulturalStory>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoryPostList {
    pub items: Vec<StoryPost>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryList {
    pub items: Vec<GalleryImage>,
}
