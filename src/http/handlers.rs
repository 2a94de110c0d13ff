//! Route handlers
//!
//! Each handler validates its input, calls the ledger, and maps the outcome.
//! Ledger errors become responses through [`ApiError`].

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::dto::{OperationRequestDto, WalletBalanceResponse};
use super::error::{ApiError, OPERATION_TYPE_MISSING, WALLET_ID_MISSING};
use crate::core::WalletLedger;
use crate::types::{OperationRequest, WalletId};

/// `POST /api/v1/wallet`
pub async fn perform_operation(
    State(ledger): State<WalletLedger>,
    payload: Result<Json<OperationRequestDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(dto) = payload?;

    let wallet_id = dto
        .wallet_id
        .ok_or_else(|| ApiError::bad_request(WALLET_ID_MISSING))?;
    let operation_type = dto
        .operation_type
        .ok_or_else(|| ApiError::bad_request(OPERATION_TYPE_MISSING))?;

    let request = OperationRequest {
        wallet_id,
        operation_type,
        amount: dto.amount,
    };
    ledger.perform_operation(&request).await?;

    Ok(StatusCode::OK)
}

/// `GET /api/v1/wallets/{walletId}`
pub async fn get_wallet_balance(
    State(ledger): State<WalletLedger>,
    wallet_id: Result<Path<WalletId>, PathRejection>,
) -> Result<Json<WalletBalanceResponse>, ApiError> {
    let Path(wallet_id) =
        wallet_id.map_err(|e| ApiError::bad_request(&format!("Invalid wallet id: {}", e)))?;

    let balance = ledger.get_balance(wallet_id)?;
    Ok(Json(WalletBalanceResponse { wallet_id, balance }))
}

/// `GET /api/v1/wallets`
pub async fn list_wallet_ids(
    State(ledger): State<WalletLedger>,
) -> Result<Json<Vec<WalletId>>, ApiError> {
    Ok(Json(ledger.list_wallet_ids()?))
}

/// `POST /api/v1/wallets`
pub async fn create_wallet(
    State(ledger): State<WalletLedger>,
) -> Result<(StatusCode, Json<WalletBalanceResponse>), ApiError> {
    let wallet = ledger.create_wallet(None)?;
    Ok((StatusCode::CREATED, Json(wallet.into())))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
