use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("malformed time: {0}")]
    MalformedTime(String),

    #[error("invalid duration: must be a positive number of minutes")]
    InvalidDuration,

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("invalid period: must be a positive number of days")]
    InvalidPeriod,

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("service not found or inactive")]
    ServiceNotFound,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("requested time slot is no longer available")]
    SlotUnavailable,

    #[error("storage unavailable: {0}")]
    StoreUnavailable(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedTime(_)
            | AppError::InvalidDuration
            | AppError::InvalidRange(_)
            | AppError::InvalidPeriod
            | AppError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotUnavailable => StatusCode::CONFLICT,
            AppError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
