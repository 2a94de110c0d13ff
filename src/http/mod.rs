//! HTTP adapter
//!
//! Exposes the ledger over JSON under `/api/v1`, plus a `/health` check.
//!
//! | Method | Path                         | Success                      |
//! |--------|------------------------------|------------------------------|
//! | POST   | `/api/v1/wallet`             | 200, empty body              |
//! | GET    | `/api/v1/wallets/{walletId}` | 200 `{walletId, balance}`    |
//! | GET    | `/api/v1/wallets`            | 200 `[walletId, ...]`        |
//! | POST   | `/api/v1/wallets`            | 201 `{walletId, balance}`    |
//! | GET    | `/health`                    | 200 `{"status":"ok"}`        |
//!
//! Failures use the body `{status, error, message}`.

pub mod dto;
pub mod error;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::core::WalletLedger;

pub use error::ApiError;

/// Build the router over a shared ledger
pub fn create_router(ledger: WalletLedger) -> Router {
    let api = Router::new()
        .route("/wallet", post(handlers::perform_operation))
        .route(
            "/wallets",
            get(handlers::list_wallet_ids).post(handlers::create_wallet),
        )
        .route("/wallets/{walletId}", get(handlers::get_wallet_balance));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(ledger)
}

/// Bind `address` and serve until Ctrl-C
pub async fn serve(ledger: WalletLedger, address: &str) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", address, e))?;
    info!(%address, "wallet ledger listening");

    axum::serve(listener, create_router(ledger))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationRequest;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn funded_ledger() -> (WalletLedger, Uuid) {
        let ledger = WalletLedger::in_memory();
        let id = ledger.create_wallet(None).unwrap().id;
        ledger
            .perform_operation(&OperationRequest::deposit(id, Decimal::new(10050, 2)))
            .await
            .unwrap();
        (ledger, id)
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(router: &Router, path: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        send(router, request).await
    }

    async fn post_raw(router: &Router, path: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, request).await
    }

    async fn post_json(router: &Router, path: &str, body: Value) -> (StatusCode, Value) {
        post_raw(router, path, &body.to_string()).await
    }

    fn assert_error(body: &Value, status: u16, error: &str, message_part: &str) {
        assert_eq!(body["status"], json!(status));
        assert_eq!(body["error"], json!(error));
        let message = body["message"].as_str().unwrap();
        assert!(
            message.contains(message_part),
            "message {message:?} lacks {message_part:?}"
        );
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_router(WalletLedger::in_memory());

        let (status, body) = get(&router, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_get_balance() {
        let (ledger, id) = funded_ledger().await;
        let router = create_router(ledger);

        let (status, body) = get(&router, &format!("/api/v1/wallets/{id}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["walletId"], json!(id.to_string()));
        assert_eq!(body["balance"].as_f64(), Some(100.5));
    }

    #[tokio::test]
    async fn test_large_amount_keeps_every_digit() {
        let ledger = WalletLedger::in_memory();
        let id = ledger.create_wallet(None).unwrap().id;
        let router = create_router(ledger.clone());
        let body = format!(
            r#"{{"walletId":"{id}","operationType":"DEPOSIT","amount":12345678901234567.89}}"#
        );

        let (status, _) = post_raw(&router, "/api/v1/wallet", &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            ledger.get_balance(id).unwrap(),
            Decimal::new(1234567890123456789, 2)
        );

        let (status, read) = get(&router, &format!("/api/v1/wallets/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read["balance"].to_string(), "12345678901234567.89");
    }

    #[tokio::test]
    async fn test_balance_is_rendered_with_two_decimals() {
        let (ledger, id) = funded_ledger().await;
        let router = create_router(ledger);

        let response = router
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/wallets/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains(r#""balance":100.50"#), "body was {text}");
    }

    #[tokio::test]
    async fn test_get_balance_not_found() {
        let router = create_router(WalletLedger::in_memory());
        let id = Uuid::new_v4();

        let (status, body) = get(&router, &format!("/api/v1/wallets/{id}")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error(&body, 404, "Not Found", &format!("Wallet not found with id: {id}"));
    }

    #[tokio::test]
    async fn test_get_balance_bad_identifier() {
        let router = create_router(WalletLedger::in_memory());

        let (status, body) = get(&router, "/api/v1/wallets/not-a-uuid").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, 400, "Bad Request", "Invalid wallet id");
    }

    #[tokio::test]
    async fn test_deposit_then_read() {
        let (ledger, id) = funded_ledger().await;
        let router = create_router(ledger.clone());

        let (status, body) = post_json(
            &router,
            "/api/v1/wallet",
            json!({ "walletId": id, "operationType": "DEPOSIT", "amount": 50.25 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::new(15075, 2));
    }

    #[tokio::test]
    async fn test_withdraw() {
        let (ledger, id) = funded_ledger().await;
        let router = create_router(ledger.clone());

        let (status, _) = post_json(
            &router,
            "/api/v1/wallet",
            json!({ "walletId": id, "operationType": "WITHDRAW", "amount": 30.00 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::new(7050, 2));
    }

    #[tokio::test]
    async fn test_withdraw_insufficient_funds() {
        let (ledger, id) = funded_ledger().await;
        let router = create_router(ledger.clone());

        let (status, body) = post_json(
            &router,
            "/api/v1/wallet",
            json!({ "walletId": id, "operationType": "WITHDRAW", "amount": 101.50 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, 400, "Bad Request", "Insufficient funds");
        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::new(10050, 2));
    }

    #[tokio::test]
    async fn test_operation_on_unknown_wallet() {
        let router = create_router(WalletLedger::in_memory());
        let id = Uuid::new_v4();

        let (status, body) = post_json(
            &router,
            "/api/v1/wallet",
            json!({ "walletId": id, "operationType": "DEPOSIT", "amount": 10 }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error(&body, 404, "Not Found", &format!("Wallet not found with id: {id}"));
    }

    #[tokio::test]
    async fn test_request_validation_messages() {
        let (ledger, id) = funded_ledger().await;
        let router = create_router(ledger.clone());

        let cases = [
            (
                json!({ "walletId": id, "operationType": "DEPOSIT", "amount": -100 }),
                "Amount must be positive",
            ),
            (
                json!({ "walletId": id, "operationType": "DEPOSIT" }),
                "Amount cannot be null",
            ),
            (
                json!({ "operationType": "DEPOSIT", "amount": 1 }),
                "Wallet ID cannot be null",
            ),
            (
                json!({ "walletId": id, "amount": 1 }),
                "Operation type cannot be null",
            ),
        ];

        for (payload, message) in cases {
            let (status, body) = post_json(&router, "/api/v1/wallet", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_error(&body, 400, "Bad Request", message);
        }

        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::new(10050, 2));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (ledger, id) = funded_ledger().await;
        let router = create_router(ledger);
        let body = format!(r#"{{"walletId":"{id}","operationType":"DEPOSIT", amount: 100 }}"#);

        let (status, body) = post_raw(&router, "/api/v1/wallet", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, 400, "Bad Request", "Malformed JSON request");
    }

    #[tokio::test]
    async fn test_unknown_operation_type_is_malformed() {
        let (ledger, id) = funded_ledger().await;
        let router = create_router(ledger);

        let (status, body) = post_json(
            &router,
            "/api/v1/wallet",
            json!({ "walletId": id, "operationType": "TRANSFER", "amount": 1 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, 400, "Bad Request", "Malformed JSON request");
    }

    #[tokio::test]
    async fn test_create_and_list_wallets() {
        let router = create_router(WalletLedger::in_memory());

        let (status, created) = post_raw(&router, "/api/v1/wallets", "").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["balance"].as_f64(), Some(0.0));
        let id = created["walletId"].as_str().unwrap().to_string();

        let (status, listed) = get(&router, "/api/v1/wallets").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([id]));

        let (status, read) = get(&router, &format!("/api/v1/wallets/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read["balance"].as_f64(), Some(0.0));
    }
}
