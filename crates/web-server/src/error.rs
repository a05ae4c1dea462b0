use api_client::error::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finance::FinanceError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Upstream error: {0}")]
    Api(#[from] ApiError),
    #[error("Invalid listings payload: {0}")]
    Payload(#[from] core_types::CoreError),
    #[error("Calculation error: {0}")]
    Finance(#[from] FinanceError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Api(ApiError::Timeout) => {
                tracing::error!("Request to the listings API timed out.");
                (StatusCode::GATEWAY_TIMEOUT, "Request timed out".to_string())
            }
            AppError::Api(ApiError::Request(err)) => {
                tracing::error!(error = %err, "Error making request to the listings API.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to fetch data: {err}"),
                )
            }
            AppError::Api(ApiError::Upstream { status, body }) => {
                tracing::warn!(status, body = %body, "Listings API returned an error status.");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("The listings API responded with status {status}"),
                )
            }
            AppError::Api(api_err) => {
                tracing::error!(error = %api_err, "Unexpected upstream error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An unexpected error occurred: {api_err}"),
                )
            }
            AppError::Payload(err) => {
                (StatusCode::BAD_REQUEST, format!("Invalid listings payload: {err}"))
            }
            AppError::Finance(FinanceError::InvalidParameters(message)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            AppError::Finance(err) => {
                tracing::error!(error = %err, "Calculation failed.");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
