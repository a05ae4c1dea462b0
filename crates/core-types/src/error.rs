use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to decode upstream payload: {0}")]
    Payload(#[from] serde_json::Error),
}
