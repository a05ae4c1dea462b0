use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FinanceError {
    #[error("Financial parameters are invalid: {0}")]
    InvalidParameters(String),

    #[error("A calculation error occurred: {0}")]
    Calculation(String),
}
