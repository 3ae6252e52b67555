//! Seed the database with related travels, customers, stays and bookings.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use travel_agency_api::config::Config;
use travel_agency_api::{db, fixtures};

/// `fixtures` command arguments.
#[derive(Debug, Parser)]
#[command(name = "fixtures", about = "Load random travel agency fixtures into the database", version)]
struct CliArgs {
    /// Number of travel/customer/stay chains to create.
    #[arg(default_value_t = 1)]
    count: usize,
    /// Delete every travel, customer and user before seeding.
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env()?;
    let pool = db::init_db(&config.database_url, config.max_connections).await?;

    if args.clear {
        fixtures::clear(&pool).await?;
    }

    let seeded = fixtures::seed(&pool, args.count).await?;
    tracing::info!(chains = seeded.len(), "fixtures loaded");

    pool.close().await;
    Ok(())
}
