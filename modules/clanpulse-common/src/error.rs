use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClanPulseError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Clash of Clans API error: {0}")]
    Api(String),

    #[error("Normalization error: {0}")]
    Normalization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
