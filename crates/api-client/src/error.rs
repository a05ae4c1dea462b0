use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("The request to the listings API timed out")]
    Timeout,

    #[error("Failed to reach the listings API: {0}")]
    Request(reqwest::Error),

    #[error("The listings API returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(#[from] CoreError),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Request(error)
        }
    }
}
