pub mod artisans;
pub mod audit_logs;
pub mod categories;
pub mod cultural_stories;
pub mod favorites;
pub mod gallery_images;
pub mod newsletters;
pub mod order_items;
pub mod orders;
pub mod product_activities;
pub mod products;
pub mod regions;
pub mod seller_products;
pub mod sellers;
pub mod story_posts;
pub mod user_profiles;
pub mod users;

pub use artisans::Entity as Artisans;
pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use cultural_stories::Entity as CulturalStories;
pub use favorites::Entity as Favorites;
pub use gallery_images::Entity as GalleryImages;
pub use newsletters::Entity as Newsletters;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_activities::Entity as ProductActivities;
pub use products::Entity as Products;
pub use regions::Entity as Regions;
pub use seller_products::Entity as SellerProducts;
pub use sellers::Entity as Sellers;
pub use story_posts::Entity as StoryPosts;
pub use user_profiles::Entity as UserProfiles;
pub use users::Entity as Users;
