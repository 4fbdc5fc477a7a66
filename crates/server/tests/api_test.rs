//! Router tests driving the HTTP API in-process.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use starchain_chain::{RegistryConfig, StarRegistry};
use starchain_core::{Keypair, Star};
use starchain_server::router;
use starchain_storage::ChainStore;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> (Router, Arc<StarRegistry>) {
    let registry = Arc::new(StarRegistry::new(
        Arc::new(ChainStore::new()),
        RegistryConfig::default(),
    ));
    registry.initialize();
    (router(Arc::clone(&registry)), registry)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn challenge(app: &Router, wallet: &Keypair) -> String {
    let (status, body) = send(
        app,
        post("/requestValidation", json!({ "address": wallet.address().to_hex() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["message"].as_str().unwrap().to_string()
}

fn star_json() -> Value {
    json!({ "ra": "5h 2m", "dec": "+15 7m", "story": "testing" })
}

#[tokio::test]
async fn test_register_and_query_star() {
    let (app, _) = app();
    let wallet = Keypair::generate();
    let address = wallet.address().to_hex();

    let message = challenge(&app, &wallet).await;
    assert!(message.starts_with(&address));
    assert!(message.ends_with(":starRegistry"));

    let signature = wallet.sign_wallet(&message).to_hex();
    let (status, block) = send(
        &app,
        post(
            "/submitstar",
            json!({
                "address": address,
                "message": message,
                "signature": signature,
                "star": star_json(),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(block["height"], 1);

    let (status, by_height) = send(&app, get("/block/height/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_height, block);

    let hash = block["hash"].as_str().unwrap();
    let (status, by_hash) = send(&app, get(&format!("/block/hash/{hash}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_hash, block);

    let (status, stars) = send(&app, get(&format!("/blocks/{address}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stars, json!([{ "owner": address, "star": star_json() }]));

    let (status, report) = send(&app, get("/validateChain")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report, json!({ "valid": true, "errors": [] }));
}

#[tokio::test]
async fn test_bad_signature_is_unauthorized() {
    let (app, registry) = app();
    let wallet = Keypair::generate();
    let message = challenge(&app, &wallet).await;
    let forged = Keypair::generate().sign_wallet(&message).to_hex();

    let (status, body) = send(
        &app,
        post(
            "/submitstar",
            json!({
                "address": wallet.address().to_hex(),
                "message": message,
                "signature": forged,
                "star": star_json(),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
    assert_eq!(registry.chain().height(), Some(0));
}

#[tokio::test]
async fn test_expired_challenge_is_gone() {
    let (app, _) = app();
    let wallet = Keypair::generate();
    let address = wallet.address();
    let message = starchain_chain::ownership_message(&address, 1_000);
    let signature = wallet.sign_wallet(&message).to_hex();

    let (status, _) = send(
        &app,
        post(
            "/submitstar",
            json!({
                "address": address.to_hex(),
                "message": message,
                "signature": signature,
                "star": Star::new("1h", "1m", "old"),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::GONE);
}

#[tokio::test]
async fn test_lookup_failures() {
    let (app, _) = app();

    let (status, _) = send(&app, get("/block/height/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get(&format!("/block/hash/{}", "00".repeat(32)))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/block/hash/xyz")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/blocks/not-an-address")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, post("/requestValidation", json!({ "address": "0x12" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let (app, registry) = app();
    let address = Keypair::generate().address().to_hex();

    let (status, body) = send(&app, post("/submitstar", json!({ "address": address }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::post("/requestValidation")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, get("/block/height/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert_eq!(registry.chain().height(), Some(0));
}

#[tokio::test]
async fn test_duplicated_hash_is_conflict() {
    let (_, registry) = app();
    let wallet = Keypair::generate();
    let message = registry.request_ownership_message(&wallet.address());
    let signature = wallet.sign_wallet(&message).to_hex();
    let block = registry
        .submit_star(&wallet.address(), &message, &signature, Star::new("1h", "1m", "twin"))
        .unwrap();

    let mut blocks = registry.chain().snapshot();
    blocks.push(block.clone());
    let app = router(Arc::new(StarRegistry::new(
        Arc::new(ChainStore::from_snapshot(blocks)),
        RegistryConfig::default(),
    )));

    let (status, body) = send(&app, get(&format!("/block/hash/{}", block.hash))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_chain_info() {
    let (app, registry) = app();
    let (status, info) = send(&app, get("/chain")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["height"], 0);
    assert_eq!(info["blocks"], 1);
    assert_eq!(
        info["latest_hash"],
        json!(registry.chain().head().unwrap().to_hex())
    );

    let empty = router(Arc::new(StarRegistry::new(
        Arc::new(ChainStore::new()),
        RegistryConfig::default(),
    )));
    let (_, info) = send(&empty, get("/chain")).await;
    assert_eq!(info["height"], -1);
}
