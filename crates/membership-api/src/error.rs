//! Error taxonomy for the portal API.
//!
//! Every variant except `Database` and `Internal` is an expected outcome:
//! the message is shown to the user verbatim, so it stays human-readable
//! and is not logged as an error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Portal error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No registration found")]
    NotFound,

    #[error("No email address on file for this registration")]
    NoContactChannel,

    #[error("Please wait before requesting another code")]
    TooManyRequests,

    #[error("Could not deliver the verification code, please try again later")]
    DeliveryFailed,

    #[error("Verification code expired, please request a new one")]
    Expired,

    #[error("Too many incorrect attempts, please request a new code")]
    TooManyAttempts,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Payment could not be verified")]
    InvalidPayment,

    #[error("Payment gateway unavailable")]
    GatewayUnavailable,

    #[error("{0}")]
    BadRequest(String),

    #[error("Verify ownership of this registration first")]
    NotVerified,

    #[error("Invalid admin credentials")]
    AdminAuth,

    #[error("Admin access is not configured")]
    AdminDisabled,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Something went wrong, please try again")]
    Database(#[from] sea_orm::DbErr),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::NoContactChannel => (StatusCode::BAD_REQUEST, "NO_CONTACT_CHANNEL"),
            ApiError::TooManyRequests => (StatusCode::TOO_MANY_REQUESTS, "OTP_THROTTLED"),
            ApiError::DeliveryFailed => (StatusCode::BAD_GATEWAY, "OTP_DELIVERY_FAILED"),
            ApiError::Expired => (StatusCode::BAD_REQUEST, "OTP_EXPIRED"),
            ApiError::TooManyAttempts => (StatusCode::BAD_REQUEST, "OTP_ATTEMPTS_EXHAUSTED"),
            ApiError::InvalidCode => (StatusCode::BAD_REQUEST, "OTP_INVALID"),
            ApiError::InvalidPayment => (StatusCode::BAD_REQUEST, "PAYMENT_INVALID"),
            ApiError::GatewayUnavailable => (StatusCode::BAD_GATEWAY, "GATEWAY_UNAVAILABLE"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotVerified => (StatusCode::FORBIDDEN, "NOT_VERIFIED"),
            ApiError::AdminAuth => (StatusCode::UNAUTHORIZED, "ADMIN_AUTH"),
            ApiError::AdminDisabled => (StatusCode::SERVICE_UNAVAILABLE, "ADMIN_DISABLED"),
            ApiError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            ApiError::Database(e) => {
                error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorBody {
            message: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
