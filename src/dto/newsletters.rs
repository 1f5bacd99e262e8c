use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Newsletter;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsletterList {
    pub items: Vec<Newsletter>,
}
