pub mod auth;
pub mod catalog;
pub mod content;
pub mod favorites;
pub mod newsletters;
pub mod orders;
pub mod sellers;
pub mod users;
