//! Errors raised by the HTTP layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}
