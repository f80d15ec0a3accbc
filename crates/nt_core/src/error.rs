use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Errors raised while talking to the search provider. These never abort a
    /// session; the controller turns them into a non-fatal outcome.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Error::Scraping(_) | Error::Http(_) | Error::External(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
