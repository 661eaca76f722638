use thiserror::Error;

pub type Result<T> = std::result::Result<T, CocError>;

#[derive(Debug, Error)]
pub enum CocError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CocError {
    fn from(err: reqwest::Error) -> Self {
        CocError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CocError {
    fn from(err: serde_json::Error) -> Self {
        CocError::Parse(err.to_string())
    }
}
