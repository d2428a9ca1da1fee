//! Relay suite: the POST /api/mint contract over mock collaborators.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{addr, MockBinding, MockProvider, ALICE, BOB, CONTRACT};
use fhemint::{create_router, MintConfig, MintDispatcher, RelayState, SessionManager};

async fn relay_router(binding: MockBinding) -> Router {
    let config = MintConfig::default();
    let provider = Arc::new(MockProvider::with_account(addr(ALICE), 11_155_111));
    let session = SessionManager::new(Some(provider), config.clone());
    session.connect().await.expect("connect relay signer");

    let dispatcher = Arc::new(MintDispatcher::new(
        Arc::new(binding),
        session.state(),
        config,
    ));
    create_router(RelayState {
        dispatcher,
        contract_address: CONTRACT.into(),
        payload: b"https://example.com/nft.json".to_vec(),
        service: "fhemint-test".into(),
    })
}

fn post_mint(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/mint")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_reports_service() {
    let router = relay_router(MockBinding::exposing(&["mint"])).await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fhemint-test");
}

#[tokio::test]
async fn mint_returns_tx_hash() {
    let router = relay_router(MockBinding::exposing(&["mint"])).await;

    let response = router
        .oneshot(post_mint(json!({"walletAddress": BOB})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let tx_hash = body["txHash"].as_str().expect("txHash");
    assert!(tx_hash.starts_with("0x"));
}

#[tokio::test]
async fn missing_wallet_address_is_400() {
    let router = relay_router(MockBinding::exposing(&["mint"])).await;

    let response = router
        .oneshot(post_mint(json!({})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "walletAddress missing");
}

#[tokio::test]
async fn malformed_wallet_address_is_400() {
    let router = relay_router(MockBinding::exposing(&["mint"])).await;

    let response = router
        .oneshot(post_mint(json!({"walletAddress": "not-an-address"})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "walletAddress is not a valid address");
}

#[tokio::test]
async fn dispatch_failure_is_500() {
    // Contract exposes none of the candidates.
    let router = relay_router(MockBinding::exposing(&[])).await;

    let response = router
        .oneshot(post_mint(json!({"walletAddress": BOB})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().expect("error").contains("candidate"));
}

#[tokio::test]
async fn confirmation_failure_is_500() {
    let router = relay_router(MockBinding::exposing(&["mint"]).failing_confirmation()).await;

    let response = router
        .oneshot(post_mint(json!({"walletAddress": BOB})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error")
        .contains("confirmation failed"));
}
