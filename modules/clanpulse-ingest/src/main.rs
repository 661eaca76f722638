use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clanpulse_common::Config;
use clanpulse_ingest::{CocSource, Ingestor};
use clanpulse_ledger::PlayerDayStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("clanpulse=info".parse()?))
        .init();

    info!("ClanPulse ingest starting...");

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    let store = PlayerDayStore::new(pool);
    store.migrate().await?;

    let source = CocSource::new(&config.coc_api_token);
    let ingestor = Ingestor::new(Box::new(source), store, config.ingest_concurrency);

    let stats = ingestor.run(&config.coc_clan_tag).await?;
    println!("{stats}");

    Ok(())
}
