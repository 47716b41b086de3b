use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoaderError>;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer; `message` is the server's `message` field when present
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
