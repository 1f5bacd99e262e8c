use kalakriti_admin::{
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{
        artisans, categories, cultural_stories, gallery_images, order_items, orders,
        product_activities, products, regions, seller_products, sellers, users,
    },
    seed::{self, SeedOptions},
    services::order_service::order_total,
    slug::slugify,
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Statement,
};

// Seed twice into an empty database, then check counts, counters and the
// delete policies on the seeded graph.
#[tokio::test]
async fn seeding_is_idempotent_and_respects_delete_policies() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run seed tests.");
            return Ok(());
        }
    };
    let orm = setup(&database_url).await?;
    let media = tempfile::tempdir()?;

    let options = SeedOptions {
        media_root: media.path().to_path_buf(),
        ..SeedOptions::default()
    };
    let first = seed::run(&orm, &options).await?;

    assert_eq!(first.images_written, 27);
    for (entity, created) in [
        ("users", 6),
        ("profiles", 5),
        ("regions", 4),
        ("categories", 4),
        ("artisans", 4),
        ("sellers", 3),
        ("products", 6),
        ("seller_products", 6),
        ("stories", 4),
        ("story_posts", 5),
        ("gallery", 5),
        ("orders", 2),
        ("order_items", 3),
        ("activity", 18),
        ("newsletters", 2),
    ] {
        let tally = first.get(entity);
        assert_eq!(tally.created, created, "{entity} created");
        assert_eq!(tally.existing, 0, "{entity} existing");
    }

    // Second pass creates nothing and leaves images alone.
    let second = seed::run(&orm, &options).await?;
    assert_eq!(second.images_written, 0);
    assert_eq!(second.total_created(), 0);
    assert_eq!(second.get("products").existing, 6);
    assert_eq!(second.get("activity").existing, 18);
    assert_eq!(products::Entity::find().count(&orm).await?, 6);
    assert_eq!(product_activities::Entity::find().count(&orm).await?, 18);

    // Order totals are the sum of their snapshotted lines.
    let mut totals = Vec::new();
    for order in orders::Entity::find().all(&orm).await? {
        let items = order.find_related(order_items::Entity).all(&orm).await?;
        assert_eq!(order_total(&items), order.total_amount);
        totals.push(order.total_amount);
    }
    totals.sort();
    assert_eq!(totals, vec![Decimal::new(279_900, 2), Decimal::new(439_800, 2)]);

    // Sadbhav Crafts lists the vase and the stole.
    let sadbhav = sellers::Entity::find()
        .filter(sellers::Column::ShopName.eq("Sadbhav Crafts"))
        .one(&orm)
        .await?
        .expect("seeded seller");
    assert_eq!(sadbhav.total_products, 2);
    assert!(sadbhav.is_verified);
    assert!((4.2..=4.9).contains(&sadbhav.rating));

    // SKUs carry the upper-cased slug prefix.
    for listing in seller_products::Entity::find().all(&orm).await? {
        let (prefix, number) = listing.seller_sku.rsplit_once('-').expect("sku suffix");
        assert_eq!(prefix, prefix.to_uppercase());
        assert_eq!(number.len(), 4);
    }

    // Deleting a category keeps its products and clears the link.
    let textiles = find_by_slug::<categories::Entity>(
        &orm,
        categories::Column::Slug,
        "textiles",
    )
    .await?
    .expect("textiles category");
    textiles.delete(&orm).await?;
    let stole = find_by_slug::<products::Entity>(
        &orm,
        products::Column::Slug,
        "ajrakh-cotton-stole",
    )
    .await?
    .expect("stole survives its category");
    assert_eq!(stole.category_id, None);

    // Deleting a product cascades to its dependents.
    let vase = find_by_slug::<products::Entity>(
        &orm,
        products::Column::Slug,
        &slugify("Blue Pottery Vase"),
    )
    .await?
    .expect("vase");
    let vase_id = vase.id;
    vase.delete(&orm).await?;
    assert_eq!(
        order_items::Entity::find()
            .filter(order_items::Column::ProductId.eq(vase_id))
            .count(&orm)
            .await?,
        0
    );
    assert_eq!(
        gallery_images::Entity::find()
            .filter(gallery_images::Column::ProductId.eq(vase_id))
            .count(&orm)
            .await?,
        0
    );
    assert_eq!(
        seller_products::Entity::find()
            .filter(seller_products::Column::ProductId.eq(vase_id))
            .count(&orm)
            .await?,
        0
    );
    assert_eq!(
        product_activities::Entity::find()
            .filter(product_activities::Column::ProductId.eq(vase_id))
            .count(&orm)
            .await?,
        0
    );

    // Deleting a region takes its artisans, stories and their gallery rows
    // with it; products only lose the links.
    let gujarat = find_by_slug::<regions::Entity>(&orm, regions::Column::Slug, "gujarat")
        .await?
        .expect("gujarat");
    let arjun = find_by_slug::<artisans::Entity>(&orm, artisans::Column::Slug, "arjun-patel")
        .await?
        .expect("arjun");
    assert_eq!(arjun.region_id, gujarat.id);
    let gujarat_id = gujarat.id;
    gujarat.delete(&orm).await?;
    assert!(artisans::Entity::find_by_id(arjun.id).one(&orm).await?.is_none());
    assert_eq!(
        cultural_stories::Entity::find()
            .filter(cultural_stories::Column::RegionId.eq(gujarat_id))
            .count(&orm)
            .await?,
        0
    );
    assert_eq!(
        gallery_images::Entity::find()
            .filter(gallery_images::Column::ArtisanId.eq(arjun.id))
            .count(&orm)
            .await?,
        0
    );
    for slug in ["ajrakh-cotton-stole", "silver-jhumkas"] {
        let product = find_by_slug::<products::Entity>(&orm, products::Column::Slug, slug)
            .await?
            .expect("product survives its region");
        assert_eq!(product.region_id, None, "{slug} region");
        assert_eq!(product.artisan_id, None, "{slug} artisan");
    }

    // Deleting an artisan keeps the product and its region.
    let karthik = find_by_slug::<artisans::Entity>(&orm, artisans::Column::Slug, "karthik-iyer")
        .await?
        .expect("karthik");
    let karthik_id = karthik.id;
    karthik.delete(&orm).await?;
    let wall_art =
        find_by_slug::<products::Entity>(&orm, products::Column::Slug, "kalamkari-wall-art")
            .await?
            .expect("wall art survives its artisan");
    assert_eq!(wall_art.artisan_id, None);
    assert!(wall_art.region_id.is_some());
    assert_eq!(
        gallery_images::Entity::find()
            .filter(gallery_images::Column::ArtisanId.eq(karthik_id))
            .count(&orm)
            .await?,
        0
    );

    // Deleting a seller drops its listings but not its products or user.
    let raaga = sellers::Entity::find()
        .filter(sellers::Column::ShopName.eq("Raaga Studio"))
        .one(&orm)
        .await?
        .expect("raaga studio");
    let (raaga_id, raaga_user) = (raaga.id, raaga.user_id);
    raaga.delete(&orm).await?;
    for slug in ["terracotta-lamp", "kantha-throw"] {
        let product = find_by_slug::<products::Entity>(&orm, products::Column::Slug, slug)
            .await?
            .expect("product survives its seller");
        assert_eq!(product.seller_id, None, "{slug} seller");
    }
    assert_eq!(
        seller_products::Entity::find()
            .filter(seller_products::Column::SellerId.eq(raaga_id))
            .count(&orm)
            .await?,
        0
    );
    assert!(users::Entity::find_by_id(raaga_user).one(&orm).await?.is_some());
    assert_eq!(products::Entity::find().count(&orm).await?, 5);

    // Reset keeps the superuser and rebuilds the rest.
    let reset = seed::run(
        &orm,
        &SeedOptions {
            reset: true,
            skip_images: true,
            ..options.clone()
        },
    )
    .await?;
    assert_eq!(reset.get("users").existing, 1);
    assert_eq!(reset.get("users").created, 5);
    assert_eq!(reset.get("products").created, 6);
    let admins = users::Entity::find()
        .filter(users::Column::IsSuperuser.eq(true))
        .count(&orm)
        .await?;
    assert_eq!(admins, 1);

    Ok(())
}

async fn find_by_slug<E>(
    orm: &DatabaseConnection,
    column: E::Column,
    slug: &str,
) -> anyhow::Result<Option<E::Model>>
where
    E: EntityTrait,
{
    Ok(E::find().filter(column.eq(slug)).one(orm).await?)
}

async fn setup(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let pool = create_pool(database_url, 2).await?;
    let orm = create_orm_conn(pool);
    run_migrations(&orm).await?;

    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, product_activities, seller_products, favorites, \
         gallery_images, story_posts, cultural_stories, products, artisans, sellers, \
         user_profiles, newsletters, categories, regions, audit_logs, users CASCADE",
    ))
    .await?;

    Ok(orm)
}
