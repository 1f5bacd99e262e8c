use std::path::PathBuf;

use clap::Parser;
use kalakriti_admin::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    seed::{self, DEFAULT_RNG_SEED, SeedOptions},
};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Load the KalaKriti demo dataset")]
struct Args {
    /// Delete existing demo data (superusers are kept) before seeding
    #[arg(long)]
    reset: bool,

    /// Seed for ratings, review counts, SKUs and activity
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    rng_seed: u64,

    /// Do not write placeholder images
    #[arg(long)]
    skip_images: bool,

    /// Media directory; defaults to MEDIA_ROOT
    #[arg(long)]
    media_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kalakriti_admin=debug".into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    let orm = create_orm_conn(pool);
    run_migrations(&orm).await?;

    let options = SeedOptions {
        reset: args.reset,
        rng_seed: args.rng_seed,
        skip_images: args.skip_images,
        media_root: args.media_root.unwrap_or(config.media_root),
    };
    let report = seed::run(&orm, &options).await?;

    for (entity, tally) in &report.entities {
        tracing::info!(
            entity,
            created = tally.created,
            existing = tally.existing,
            "seeded"
        );
    }
    tracing::info!(
        images = report.images_written,
        created = report.total_created(),
        "Seed data created"
    );
    Ok(())
}
