use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{User, UserProfile};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserWithProfile {
    pub user: User,
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<UserWithProfile>,
}
