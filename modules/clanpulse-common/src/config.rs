use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Clash of Clans API
    pub coc_api_token: String,
    pub coc_clan_tag: String,

    // Database (Postgres)
    pub database_url: String,

    // Ingestion
    pub ingest_concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            coc_api_token: required_env("COC_API_TOKEN"),
            coc_clan_tag: required_env("COC_CLAN_TAG"),
            database_url: required_env("DATABASE_URL"),
            ingest_concurrency: env::var("INGEST_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .expect("INGEST_CONCURRENCY must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
