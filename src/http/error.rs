//! Mapping from ledger errors to HTTP responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use super::dto::ErrorResponse;
use crate::types::WalletError;

pub const WALLET_ID_MISSING: &str = "Wallet ID cannot be null";
pub const OPERATION_TYPE_MISSING: &str = "Operation type cannot be null";
pub const MALFORMED_JSON: &str = "Malformed JSON request";

/// Error returned by every handler
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 400 with the given message
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// HTTP status for a ledger error
pub fn status_for(err: &WalletError) -> StatusCode {
    match err {
        WalletError::NotFound { .. } => StatusCode::NOT_FOUND,
        WalletError::AlreadyExists { .. } => StatusCode::CONFLICT,
        WalletError::InvalidAmount { .. } | WalletError::InsufficientFunds { .. } => {
            StatusCode::BAD_REQUEST
        }
        WalletError::StoreContention { .. } => StatusCode::SERVICE_UNAVAILABLE,
        WalletError::RetriesExhausted { .. }
        | WalletError::BalanceOverflow { .. }
        | WalletError::Storage { .. }
        | WalletError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        Self {
            status: status_for(&err),
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        Self::bad_request(MALFORMED_JSON)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), message = %self.message, "request failed");
        }

        let body = ErrorResponse {
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}
