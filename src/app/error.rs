use thiserror::Error;

#[derive(Error, Debug)]
pub enum DarkroomError {
    /// Transport-level failure: no usable response was obtained.
    #[error("Could not reach the feed server")]
    Connectivity,

    /// A response arrived but failed status or format validation.
    #[error("The server response was not in the expected format")]
    InvalidData,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No cached data for image {0}")]
    ImageNotFound(url::Url),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DarkroomError>;
