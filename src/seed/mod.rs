//! Deterministic demo dataset.
//!
//! [`run`] walks the fixture tables in foreign-key order and get-or-creates
//! every row inside one transaction, so a rerun only fills gaps. Random
//! fields (ratings, review counts, SKUs, activity) come from a seeded
//! [`StdRng`] and are drawn whether or not the row already exists, which
//! keeps the sequence independent of what the database holds.

pub mod fixtures;
pub mod images;

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::bail;
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::{
        artisans, categories, cultural_stories, gallery_images, newsletters, order_items, orders,
        product_activities::{self, ActivityType},
        products, regions, seller_products, sellers, story_posts,
        user_profiles::{self, UserType},
        users,
    },
    services::{
        auth_service::hash_password, in_stock, seller_service::record_activity,
        story_service::DEFAULT_STORY_CATEGORY,
    },
    slug::slugify,
};

use fixtures::{GalleryLink, rupees};

pub const DEFAULT_RNG_SEED: u64 = 42;

const SEEDED_ACTIVITY: [ActivityType; 4] = [
    ActivityType::View,
    ActivityType::Click,
    ActivityType::AddCart,
    ActivityType::Purchase,
];

const MAX_SKU_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Delete existing demo data (everything but superusers) first.
    pub reset: bool,
    pub rng_seed: u64,
    pub skip_images: bool,
    pub media_root: PathBuf,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            reset: false,
            rng_seed: DEFAULT_RNG_SEED,
            skip_images: false,
            media_root: PathBuf::from("media"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub created: usize,
    pub existing: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub images_written: usize,
    pub entities: BTreeMap<&'static str, Tally>,
}

impl SeedReport {
    pub fn get(&self, entity: &str) -> Tally {
        self.entities.get(entity).copied().unwrap_or_default()
    }

    pub fn total_created(&self) -> usize {
        self.entities.values().map(|t| t.created).sum()
    }

    fn note(&mut self, entity: &'static str, created: bool) {
        let tally = self.entities.entry(entity).or_default();
        if created {
            tally.created += 1;
        } else {
            tally.existing += 1;
        }
    }
}

/// Seed the database. Images are written first; all rows go through a
/// single transaction that is committed only when every stage succeeds.
pub async fn run(db: &OrmConn, options: &SeedOptions) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();
    if !options.skip_images {
        report.images_written = images::write_placeholders(&options.media_root).await?;
    }

    let txn = db.begin().await?;
    if options.reset {
        reset(&txn).await?;
    }

    let mut seeder = Seeder {
        txn: &txn,
        rng: StdRng::seed_from_u64(options.rng_seed),
        report,
    };

    let accounts = seeder.users().await?;
    seeder.profiles(&accounts).await?;
    let regions = seeder.regions().await?;
    let categories = seeder.categories().await?;
    let artisans = seeder.artisans(&regions).await?;
    let sellers = seeder.sellers(&accounts, &regions).await?;
    let products = seeder
        .products(&categories, &regions, &artisans, &sellers)
        .await?;
    seeder.seller_counters(&sellers).await?;
    seeder.seller_products(&products).await?;
    seeder.stories(&regions).await?;
    seeder.posts(&accounts).await?;
    seeder.gallery(&artisans, &products, &regions).await?;
    seeder.orders(&accounts, &products).await?;
    seeder.activity(&accounts, &products).await?;
    seeder.newsletters(&accounts).await?;

    let report = seeder.report;
    txn.commit().await?;

    tracing::info!(
        created = report.total_created(),
        images = report.images_written,
        "seed complete"
    );
    Ok(report)
}

/// Remove demo rows children-first. Superusers survive.
async fn reset(txn: &DatabaseTransaction) -> anyhow::Result<()> {
    let mut removed = 0;
    removed += order_items::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += orders::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += product_activities::Entity::delete_many()
        .exec(txn)
        .await?
        .rows_affected;
    removed += seller_products::Entity::delete_many()
        .exec(txn)
        .await?
        .rows_affected;
    removed += products::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += gallery_images::Entity::delete_many()
        .exec(txn)
        .await?
        .rows_affected;
    removed += cultural_stories::Entity::delete_many()
        .exec(txn)
        .await?
        .rows_affected;
    removed += story_posts::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += artisans::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += sellers::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += user_profiles::Entity::delete_many()
        .exec(txn)
        .await?
        .rows_affected;
    removed += newsletters::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += categories::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += regions::Entity::delete_many().exec(txn).await?.rows_affected;
    removed += users::Entity::delete_many()
        .filter(users::Column::IsSuperuser.eq(false))
        .exec(txn)
        .await?
        .rows_affected;

    tracing::warn!(rows = removed, "existing demo data removed");
    Ok(())
}

/// `UPPER(slug[..10])-NNNN`
fn sku(slug: &str, number: u32) -> String {
    let prefix: String = slug.chars().take(10).collect();
    format!("{}-{number}", prefix.to_uppercase())
}

struct Seeder<'a> {
    txn: &'a DatabaseTransaction,
    rng: StdRng,
    report: SeedReport,
}

impl Seeder<'_> {
    fn stage_done(&self, stage: &'static str) {
        let tally = self.report.get(stage);
        tracing::info!(
            stage,
            created = tally.created,
            existing = tally.existing,
            "seed stage done"
        );
    }

    /// Two decimal places, like the stored ratings.
    fn rating(&mut self, low: f64, high: f64) -> f64 {
        (self.rng.gen_range(low..=high) * 100.0).round() / 100.0
    }

    /// Accounts in [`fixtures::ACCOUNTS`] order. The admin is ensured but
    /// not returned.
    async fn users(&mut self) -> anyhow::Result<Vec<users::Model>> {
        self.ensure_user(fixtures::ADMIN_USERNAME, fixtures::ADMIN_PASSWORD, true)
            .await?;

        let mut out = Vec::with_capacity(fixtures::ACCOUNTS.len());
        for account in fixtures::ACCOUNTS {
            let user = self
                .ensure_user(account.username, fixtures::DEMO_PASSWORD, false)
                .await?;
            out.push(user);
        }
        self.stage_done("users");
        Ok(out)
    }

    /// Lookup is by username. The password is only written on create or
    /// when the stored hash is unusable.
    async fn ensure_user(
        &mut self,
        username: &str,
        password: &str,
        superuser: bool,
    ) -> anyhow::Result<users::Model> {
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(self.txn)
            .await?;

        let (user, created) = match existing {
            Some(user) if user.has_usable_password() => (user, false),
            Some(user) => {
                let mut active: users::ActiveModel = user.into();
                active.password_hash = Set(hash_password(password)?);
                tracing::debug!(username, "password set on unusable account");
                (active.update(self.txn).await?, false)
            }
            None => {
                let user = users::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    username: Set(username.to_string()),
                    email: Set(fixtures::email_for(username)),
                    password_hash: Set(hash_password(password)?),
                    is_staff: Set(superuser),
                    is_superuser: Set(superuser),
                    is_active: Set(true),
                    created_at: NotSet,
                }
                .insert(self.txn)
                .await?;
                (user, true)
            }
        };
        self.report.note("users", created);
        Ok(user)
    }

    async fn profiles(&mut self, accounts: &[users::Model]) -> anyhow::Result<()> {
        for (fixture, user) in fixtures::ACCOUNTS.iter().zip(accounts) {
            let existing = user_profiles::Entity::find()
                .filter(user_profiles::Column::UserId.eq(user.id))
                .one(self.txn)
                .await?;
            if existing.is_none() {
                user_profiles::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user.id),
                    user_type: Set(fixture.user_type),
                    phone: Set(fixture.phone.to_string()),
                    address: Set(fixture.address()),
                    city: Set(fixture.city.to_string()),
                    state: Set(fixtures::PROFILE_STATE.to_string()),
                    pincode: Set(fixtures::PROFILE_PINCODE.to_string()),
                    profile_image: Set(Some(fixture.profile_image().to_string())),
                    terms_accepted_at: Set(None),
                    terms_version: NotSet,
                    seller_verified: NotSet,
                    created_at: NotSet,
                    updated_at: NotSet,
                }
                .insert(self.txn)
                .await?;
            }
            self.report.note("profiles", existing.is_none());
        }
        self.stage_done("profiles");
        Ok(())
    }

    async fn regions(&mut self) -> anyhow::Result<Vec<regions::Model>> {
        let mut out = Vec::with_capacity(fixtures::REGIONS.len());
        for fixture in fixtures::REGIONS {
            let slug = slugify(fixture.name);
            let existing = regions::Entity::find()
                .filter(regions::Column::Slug.eq(&slug))
                .one(self.txn)
                .await?;
            let (region, created) = match existing {
                Some(region) => (region, false),
                None => {
                    let region = regions::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(fixture.name.to_string()),
                        image: Set(format!("regions/{slug}.jpg")),
                        slug: Set(slug),
                        description: Set(fixture.description.to_string()),
                        cultural_heritage: Set(fixtures::cultural_heritage(fixture.name)),
                        created_at: NotSet,
                    }
                    .insert(self.txn)
                    .await?;
                    (region, true)
                }
            };
            self.report.note("regions", created);
            out.push(region);
        }
        self.stage_done("regions");
        Ok(out)
    }

    async fn categories(&mut self) -> anyhow::Result<Vec<categories::Model>> {
        let mut out = Vec::with_capacity(fixtures::CATEGORIES.len());
        for fixture in fixtures::CATEGORIES {
            let slug = slugify(fixture.name);
            let existing = categories::Entity::find()
                .filter(categories::Column::Slug.eq(&slug))
                .one(self.txn)
                .await?;
            let (category, created) = match existing {
                Some(category) => (category, false),
                None => {
                    let category = categories::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(fixture.name.to_string()),
                        image: Set(format!("categories/{slug}.jpg")),
                        slug: Set(slug),
                        description: Set(fixture.description.to_string()),
                        created_at: NotSet,
                    }
                    .insert(self.txn)
                    .await?;
                    (category, true)
                }
            };
            self.report.note("categories", created);
            out.push(category);
        }
        self.stage_done("categories");
        Ok(out)
    }

    async fn artisans(
        &mut self,
        regions: &[regions::Model],
    ) -> anyhow::Result<Vec<artisans::Model>> {
        let mut out = Vec::with_capacity(fixtures::ARTISANS.len());
        for fixture in fixtures::ARTISANS {
            let slug = slugify(fixture.name);
            let existing = artisans::Entity::find()
                .filter(artisans::Column::Slug.eq(&slug))
                .one(self.txn)
                .await?;
            let (artisan, created) = match existing {
                Some(artisan) => (artisan, false),
                None => {
                    let artisan = artisans::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(fixture.name.to_string()),
                        bio: Set(fixture.bio.to_string()),
                        image: Set(format!("artisans/{slug}.jpg")),
                        region_id: Set(regions[fixture.region].id),
                        specialty: Set(fixture.specialty.to_string()),
                        years_of_experience: Set(fixture.years),
                        email: Set(fixtures::email_for(&slug)),
                        phone: Set(fixtures::ARTISAN_PHONE.to_string()),
                        website: Set(format!("https://{slug}.example.com")),
                        social_media_links: Set(
                            json!({ "instagram": format!("https://instagram.com/{slug}") }),
                        ),
                        featured: Set(fixture.featured),
                        slug: Set(slug),
                        created_at: NotSet,
                        updated_at: NotSet,
                    }
                    .insert(self.txn)
                    .await?;
                    (artisan, true)
                }
            };
            self.report.note("artisans", created);
            out.push(artisan);
        }
        self.stage_done("artisans");
        Ok(out)
    }

    async fn sellers(
        &mut self,
        accounts: &[users::Model],
        regions: &[regions::Model],
    ) -> anyhow::Result<Vec<sellers::Model>> {
        let mut out = Vec::with_capacity(fixtures::SELLERS.len());
        for fixture in fixtures::SELLERS {
            let rating = self.rating(4.2, 4.9);
            let user = &accounts[fixture.account];
            let existing = sellers::Entity::find()
                .filter(sellers::Column::UserId.eq(user.id))
                .one(self.txn)
                .await?;
            let (seller, created) = match existing {
                Some(seller) => (seller, false),
                None => {
                    let seller = sellers::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        user_id: Set(user.id),
                        shop_name: Set(fixture.shop_name.to_string()),
                        shop_description: Set(fixture.description.to_string()),
                        shop_logo: Set(Some(fixture.logo.to_string())),
                        phone: Set(fixtures::SELLER_PHONE.to_string()),
                        state: Set(regions[fixture.region].name.clone()),
                        bank_account: Set(fixtures::BANK_ACCOUNT.to_string()),
                        bank_name: Set(fixtures::BANK_NAME.to_string()),
                        ifsc_code: Set(fixtures::IFSC_CODE.to_string()),
                        total_products: Set(0),
                        total_sales: Set(rupees(0)),
                        rating: Set(rating),
                        is_verified: Set(true),
                        is_active: Set(true),
                        created_at: NotSet,
                        updated_at: NotSet,
                    }
                    .insert(self.txn)
                    .await?;
                    (seller, true)
                }
            };
            self.report.note("sellers", created);
            out.push(seller);
        }
        self.stage_done("sellers");
        Ok(out)
    }

    async fn products(
        &mut self,
        categories: &[categories::Model],
        regions: &[regions::Model],
        artisans: &[artisans::Model],
        sellers: &[sellers::Model],
    ) -> anyhow::Result<Vec<products::Model>> {
        let mut out = Vec::with_capacity(fixtures::PRODUCTS.len());
        for fixture in fixtures::PRODUCTS {
            let rating = self.rating(4.1, 4.9);
            let reviews_count = self.rng.gen_range(6..=42);
            let slug = slugify(fixture.name);
            let existing = products::Entity::find()
                .filter(products::Column::Slug.eq(&slug))
                .one(self.txn)
                .await?;
            let (product, created) = match existing {
                Some(product) => (product, false),
                None => {
                    let product = products::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(fixture.name.to_string()),
                        slug: Set(slug),
                        description: Set(fixture.description.to_string()),
                        category_id: Set(Some(categories[fixture.category].id)),
                        region_id: Set(Some(regions[fixture.region].id)),
                        artisan_id: Set(Some(artisans[fixture.artisan].id)),
                        seller_id: Set(Some(sellers[fixture.seller].id)),
                        price: Set(fixture.price()),
                        original_price: Set(Some(fixture.original_price())),
                        stock: Set(fixture.stock),
                        image: Set(fixture.image.to_string()),
                        gallery_images: Set(json!([fixture.image])),
                        featured: Set(fixture.featured),
                        in_stock: Set(in_stock(fixture.stock)),
                        rating: Set(rating),
                        reviews_count: Set(reviews_count),
                        created_at: NotSet,
                        updated_at: NotSet,
                    }
                    .insert(self.txn)
                    .await?;
                    (product, true)
                }
            };
            self.report.note("products", created);
            out.push(product);
        }
        self.stage_done("products");
        Ok(out)
    }

    /// Product count from the database; sales are demo figures.
    async fn seller_counters(&mut self, sellers: &[sellers::Model]) -> anyhow::Result<()> {
        for seller in sellers {
            let total_sales = rupees(self.rng.gen_range(50..=200) * 100);
            let total_products = products::Entity::find()
                .filter(products::Column::SellerId.eq(seller.id))
                .count(self.txn)
                .await?;

            let mut active: sellers::ActiveModel = seller.clone().into();
            active.total_products = Set(i32::try_from(total_products)?);
            active.total_sales = Set(total_sales);
            active.updated_at = Set(Utc::now().fixed_offset());
            active.update(self.txn).await?;

            tracing::debug!(
                shop = %seller.shop_name,
                total_products,
                total_sales = %total_sales,
                "seller counters set"
            );
        }
        Ok(())
    }

    async fn seller_products(&mut self, products: &[products::Model]) -> anyhow::Result<()> {
        for product in products {
            let Some(seller_id) = product.seller_id else {
                continue;
            };
            let candidate = self.sku_candidate(&product.slug);
            let existing = seller_products::Entity::find()
                .filter(seller_products::Column::SellerId.eq(seller_id))
                .filter(seller_products::Column::ProductId.eq(product.id))
                .one(self.txn)
                .await?;
            if existing.is_none() {
                let sku = self.unique_sku(&product.slug, candidate).await?;
                seller_products::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    seller_id: Set(seller_id),
                    product_id: Set(product.id),
                    seller_sku: Set(sku),
                    seller_price: Set(product.price),
                    seller_stock: Set(product.stock),
                    added_at: NotSet,
                    updated_at: NotSet,
                }
                .insert(self.txn)
                .await?;
            }
            self.report.note("seller_products", existing.is_none());
        }
        self.stage_done("seller_products");
        Ok(())
    }

    fn sku_candidate(&mut self, slug: &str) -> String {
        let number = self.rng.gen_range(1000..=9999);
        sku(slug, number)
    }

    async fn unique_sku(&mut self, slug: &str, mut sku: String) -> anyhow::Result<String> {
        for _ in 0..MAX_SKU_ATTEMPTS {
            let taken = seller_products::Entity::find()
                .filter(seller_products::Column::SellerSku.eq(&sku))
                .count(self.txn)
                .await?
                > 0;
            if !taken {
                return Ok(sku);
            }
            sku = self.sku_candidate(slug);
        }
        bail!("no free SKU for {slug} after {MAX_SKU_ATTEMPTS} attempts")
    }

    async fn stories(&mut self, regions: &[regions::Model]) -> anyhow::Result<()> {
        for fixture in fixtures::STORIES {
            let slug = slugify(fixture.title);
            let existing = cultural_stories::Entity::find()
                .filter(cultural_stories::Column::Slug.eq(&slug))
                .one(self.txn)
                .await?;
            if existing.is_none() {
                cultural_stories::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    title: Set(fixture.title.to_string()),
                    slug: Set(slug),
                    content: Set(fixture.content.to_string()),
                    author: Set(fixtures::STORY_AUTHOR.to_string()),
                    featured_image: Set(fixtures::STORY_IMAGE.to_string()),
                    region_id: Set(regions[fixture.region].id),
                    category: Set(DEFAULT_STORY_CATEGORY.to_string()),
                    published: Set(true),
                    created_at: NotSet,
                    updated_at: NotSet,
                }
                .insert(self.txn)
                .await?;
            }
            self.report.note("stories", existing.is_none());
        }
        self.stage_done("stories");
        Ok(())
    }

    async fn posts(&mut self, accounts: &[users::Model]) -> anyhow::Result<()> {
        for fixture in fixtures::POSTS {
            let user = &accounts[fixture.account];
            let exists = story_posts::Entity::find()
                .filter(story_posts::Column::UserId.eq(user.id))
                .filter(story_posts::Column::Content.eq(fixture.content))
                .count(self.txn)
                .await?
                > 0;
            if !exists {
                story_posts::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user.id),
                    content: Set(fixture.content.to_string()),
                    mentioned_product_id: Set(None),
                    mentioned_artisan_id: Set(None),
                    created_at: NotSet,
                    updated_at: NotSet,
                }
                .insert(self.txn)
                .await?;
            }
            self.report.note("story_posts", !exists);
        }
        self.stage_done("story_posts");
        Ok(())
    }

    async fn gallery(
        &mut self,
        artisans: &[artisans::Model],
        products: &[products::Model],
        regions: &[regions::Model],
    ) -> anyhow::Result<()> {
        for fixture in fixtures::GALLERY {
            let existing = gallery_images::Entity::find()
                .filter(gallery_images::Column::Title.eq(fixture.title))
                .one(self.txn)
                .await?;
            if existing.is_none() {
                let (artisan_id, product_id, region_id) = match fixture.link {
                    GalleryLink::Artisan(i) => (Some(artisans[i].id), None, None),
                    GalleryLink::Product(i) => (None, Some(products[i].id), None),
                    GalleryLink::Region(i) => (None, None, Some(regions[i].id)),
                };
                gallery_images::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    title: Set(fixture.title.to_string()),
                    image: Set(fixture.image.to_string()),
                    description: Set(fixture.description()),
                    artisan_id: Set(artisan_id),
                    product_id: Set(product_id),
                    region_id: Set(region_id),
                    featured: Set(fixture.featured),
                    created_at: NotSet,
                }
                .insert(self.txn)
                .await?;
            }
            self.report.note("gallery", existing.is_none());
        }
        self.stage_done("gallery");
        Ok(())
    }

    /// Orders are matched on (user, status), items on (order, product).
    /// Item prices are copied from the product at insert time.
    async fn orders(
        &mut self,
        accounts: &[users::Model],
        products: &[products::Model],
    ) -> anyhow::Result<()> {
        for fixture in fixtures::ORDERS {
            let user = &accounts[fixture.account];
            let existing = orders::Entity::find()
                .filter(orders::Column::UserId.eq(user.id))
                .filter(orders::Column::Status.eq(fixture.status))
                .one(self.txn)
                .await?;
            let (order, created) = match existing {
                Some(order) => (order, false),
                None => {
                    let order = orders::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        user_id: Set(user.id),
                        total_amount: Set(fixture.total()),
                        status: Set(fixture.status),
                        shipping_address: Set(fixture.shipping_address.to_string()),
                        created_at: NotSet,
                        updated_at: NotSet,
                    }
                    .insert(self.txn)
                    .await?;
                    (order, true)
                }
            };
            self.report.note("orders", created);

            for (index, quantity) in fixture.items {
                let product = &products[*index];
                let existing = order_items::Entity::find()
                    .filter(order_items::Column::OrderId.eq(order.id))
                    .filter(order_items::Column::ProductId.eq(product.id))
                    .one(self.txn)
                    .await?;
                if existing.is_none() {
                    order_items::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        order_id: Set(order.id),
                        product_id: Set(product.id),
                        quantity: Set(*quantity),
                        price: Set(product.price),
                    }
                    .insert(self.txn)
                    .await?;
                }
                self.report.note("order_items", existing.is_none());
            }
        }
        self.stage_done("orders");
        self.stage_done("order_items");
        Ok(())
    }

    /// Products that already have activity are left alone, so reruns do not
    /// grow the log.
    async fn activity(
        &mut self,
        accounts: &[users::Model],
        products: &[products::Model],
    ) -> anyhow::Result<()> {
        let buyers: Vec<Uuid> = fixtures::ACCOUNTS
            .iter()
            .zip(accounts)
            .filter(|(fixture, _)| fixture.user_type == UserType::Buyer)
            .map(|(_, user)| user.id)
            .collect();
        if buyers.is_empty() {
            bail!("activity needs at least one buyer account");
        }

        for product in products {
            let Some(seller_id) = product.seller_id else {
                continue;
            };
            let events: Vec<(ActivityType, Uuid)> = (0..fixtures::ACTIVITY_PER_PRODUCT)
                .map(|_| {
                    let kind = SEEDED_ACTIVITY[self.rng.gen_range(0..SEEDED_ACTIVITY.len())];
                    let user = buyers[self.rng.gen_range(0..buyers.len())];
                    (kind, user)
                })
                .collect();

            let logged = product_activities::Entity::find()
                .filter(product_activities::Column::ProductId.eq(product.id))
                .count(self.txn)
                .await?;
            if logged > 0 {
                self.report.entities.entry("activity").or_default().existing += logged as usize;
                continue;
            }

            for (kind, user_id) in events {
                record_activity(
                    self.txn,
                    seller_id,
                    product.id,
                    kind,
                    Some(user_id),
                    json!({ "source": "seed", "ref": "homepage" }),
                )
                .await?;
                self.report.note("activity", true);
            }
        }
        self.stage_done("activity");
        Ok(())
    }

    async fn newsletters(&mut self, accounts: &[users::Model]) -> anyhow::Result<()> {
        let buyer_emails = fixtures::ACCOUNTS
            .iter()
            .zip(accounts)
            .filter(|(fixture, _)| fixture.user_type == UserType::Buyer)
            .map(|(_, user)| user.email.clone());

        for email in buyer_emails {
            let existing = newsletters::Entity::find()
                .filter(newsletters::Column::Email.eq(&email))
                .one(self.txn)
                .await?;
            if existing.is_none() {
                newsletters::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    email: Set(email),
                    subscribed_at: NotSet,
                }
                .insert(self.txn)
                .await?;
            }
            self.report.note("newsletters", existing.is_none());
        }
        self.stage_done("newsletters");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_tallies_per_entity() {
        let mut report = SeedReport::default();
        report.note("regions", true);
        report.note("regions", false);
        report.note("products", true);

        assert_eq!(
            report.get("regions"),
            Tally {
                created: 1,
                existing: 1
            }
        );
        assert_eq!(report.get("orders"), Tally::default());
        assert_eq!(report.total_created(), 2);
    }

    #[test]
    fn skus_use_the_upper_cased_slug_prefix() {
        assert_eq!(sku("blue-pottery-vase", 4821), "BLUE-POTTE-4821");
        assert_eq!(sku("lamp", 1000), "LAMP-1000");
    }

    #[test]
    fn same_seed_draws_the_same_ratings() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..5)
                .map(|_| rng.gen_range(4.2..=4.9_f64))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(DEFAULT_RNG_SEED), draw(DEFAULT_RNG_SEED));
        assert_ne!(draw(DEFAULT_RNG_SEED), draw(7));
    }

    #[test]
    fn default_options_use_seed_42() {
        let options = SeedOptions::default();
        assert_eq!(options.rng_seed, 42);
        assert!(!options.reset);
        assert_eq!(options.media_root, PathBuf::from("media"));
    }
}
