//! HTTP client behaviour against an in-process axum backend.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use papertrade::core::service::ApiService;
use papertrade::services::api::client::REQUEST_ID_HEADER;
use papertrade::services::api::ApiClient;
use papertrade::AppError;
use serde_json::json;
use shared::{PlaceTradeRequest, TradeSide};

#[derive(Clone, Default)]
struct Seen {
    headers: Arc<Mutex<Vec<HeaderMap>>>,
}

async fn wallet(State(seen): State<Seen>, headers: HeaderMap) -> impl IntoResponse {
    seen.headers.lock().push(headers);
    Json(json!({
        "data": { "balance": 9500.25, "currency": "USD", "lastUpdated": "2024-06-04T10:00:00Z" }
    }))
}

async fn trades_unauthorized() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid token" })))
}

async fn place_rejected() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, "Insufficient balance")
}

async fn transactions_empty_error() -> impl IntoResponse {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn live_price_json_error() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Unknown symbol" })))
}

async fn read_all() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

async fn mark_read_text() -> impl IntoResponse {
    (StatusCode::OK, "Notification marked as read")
}

async fn spawn_backend() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/wallet", get(wallet))
        .route("/api/user/trades", get(trades_unauthorized))
        .route("/api/trade/place", post(place_rejected))
        .route("/api/wallet/transactions", get(transactions_empty_error))
        .route("/api/trades/live-price/{symbol}", get(live_price_json_error))
        .route("/api/notifications/read-all", put(read_all))
        .route("/api/notifications/{id}/read", put(mark_read_text))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/api", addr), seen)
}

#[tokio::test]
async fn unwraps_data_and_sends_auth_headers() {
    let (base, seen) = spawn_backend().await;
    let client = ApiClient::with_base_url(base);
    client.set_token(Some("jwt-123".to_string()));

    let wallet = client.get_wallet().await.unwrap();
    assert_eq!(wallet.balance, 9500.25);
    assert_eq!(wallet.currency, "USD");

    let headers = seen.headers.lock();
    let first = &headers[0];
    assert_eq!(first.get("authorization").unwrap(), "Bearer jwt-123");
    let request_id = first.get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let (base, seen) = spawn_backend().await;
    let client = ApiClient::with_base_url(base);

    client.get_wallet().await.unwrap();
    assert!(seen.headers.lock()[0].get("authorization").is_none());
}

#[tokio::test]
async fn unauthorized_maps_to_dedicated_error() {
    let (base, _) = spawn_backend().await;
    let client = ApiClient::with_base_url(base);

    let err = client.get_user_trades().await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn plain_text_error_body_is_passed_through() {
    let (base, _) = spawn_backend().await;
    let client = ApiClient::with_base_url(base);

    let err = client
        .place_trade(PlaceTradeRequest {
            symbol: "BTCUSDT".to_string(),
            quantity: 1.0,
            side: TradeSide::Buy,
        })
        .await
        .unwrap_err();
    match err {
        AppError::Api(message) => assert_eq!(message, "Insufficient balance"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_error_body_reports_status() {
    let (base, _) = spawn_backend().await;
    let client = ApiClient::with_base_url(base);

    let err = client.get_wallet_transactions().await.unwrap_err();
    match err {
        AppError::Api(message) => assert_eq!(message, "HTTP error! status: 500"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn json_error_field_is_extracted() {
    let (base, _) = spawn_backend().await;
    let client = ApiClient::with_base_url(base);

    let err = client.get_live_price("NOPE").await.unwrap_err();
    assert_eq!(err, AppError::Api("Unknown symbol".to_string()));
}

#[tokio::test]
async fn no_content_response_is_success() {
    let (base, _) = spawn_backend().await;
    let client = ApiClient::with_base_url(base);

    client.mark_all_notifications_read().await.unwrap();
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let client = ApiClient::with_base_url("http://127.0.0.1:9/api");
    let err = client.get_wallet().await.unwrap_err();
    assert!(!err.is_unauthorized());
    assert!(err.to_string().contains("Network error"));
}

#[tokio::test]
async fn plain_text_success_body_is_accepted() {
    let (base, _) = spawn_backend().await;
    let client = ApiClient::with_base_url(base);

    client.mark_notification_read("n1").await.unwrap();
}
