//! HTTP routes over the star registry.

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use starchain_chain::{IntegrityError, StarRegistry};
use starchain_core::{Address, Block, Hash, Star, StarRecord};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub type AppState = Arc<StarRegistry>;

#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitStarRequest {
    pub address: String,
    pub message: String,
    pub signature: String,
    pub star: Star,
}

#[derive(Debug, Serialize)]
pub struct ValidateChainResponse {
    pub valid: bool,
    pub errors: Vec<IntegrityError>,
}

#[derive(Debug, Serialize)]
pub struct ChainInfoResponse {
    /// `-1` before the genesis block exists.
    pub height: i64,
    pub blocks: usize,
    pub latest_hash: Option<Hash>,
}

/// Build the router with every registry route.
pub fn router(registry: AppState) -> Router {
    Router::new()
        .route("/requestValidation", post(request_validation))
        .route("/submitstar", post(submit_star))
        .route("/block/height/:height", get(block_by_height))
        .route("/block/hash/:hash", get(block_by_hash))
        .route("/blocks/:address", get(stars_by_address))
        .route("/validateChain", get(validate_chain))
        .route("/chain", get(chain_info))
        .layer(CorsLayer::permissive())
        .with_state(registry)
}

fn parse_address(s: &str) -> ApiResult<Address> {
    Address::from_hex(s).map_err(|_| ApiError::BadRequest(format!("invalid address: {s}")))
}

/// POST /requestValidation
async fn request_validation(
    State(registry): State<AppState>,
    ApiJson(req): ApiJson<ValidationRequest>,
) -> ApiResult<Json<ValidationResponse>> {
    let address = parse_address(&req.address)?;
    Ok(Json(ValidationResponse {
        message: registry.request_ownership_message(&address),
    }))
}

/// POST /submitstar
async fn submit_star(
    State(registry): State<AppState>,
    ApiJson(req): ApiJson<SubmitStarRequest>,
) -> ApiResult<Json<Block>> {
    let address = parse_address(&req.address)?;
    let block = tokio::task::spawn_blocking(move || {
        registry.submit_star(&address, &req.message, &req.signature, req.star)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(block))
}

/// GET /block/height/:height
async fn block_by_height(
    State(registry): State<AppState>,
    ApiPath(height): ApiPath<u64>,
) -> ApiResult<Json<Block>> {
    registry
        .get_block_by_height(height)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no block at height {height}")))
}

/// GET /block/hash/:hash
async fn block_by_hash(
    State(registry): State<AppState>,
    ApiPath(hash): ApiPath<String>,
) -> ApiResult<Json<Block>> {
    let hash = Hash::from_hex(&hash)
        .map_err(|_| ApiError::BadRequest(format!("invalid block hash: {hash}")))?;
    Ok(Json(registry.get_block_by_hash(&hash)?))
}

/// GET /blocks/:address
///
/// Decoding runs on the blocking pool and is joined before responding.
async fn stars_by_address(
    State(registry): State<AppState>,
    ApiPath(address): ApiPath<String>,
) -> ApiResult<Json<Vec<StarRecord>>> {
    let address = parse_address(&address)?;
    let stars = tokio::task::spawn_blocking(move || registry.get_stars_by_wallet_address(&address))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(stars))
}

/// GET /validateChain
async fn validate_chain(
    State(registry): State<AppState>,
) -> ApiResult<Json<ValidateChainResponse>> {
    let errors = tokio::task::spawn_blocking(move || registry.validate_chain())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(ValidateChainResponse {
        valid: errors.is_empty(),
        errors,
    }))
}

/// GET /chain
async fn chain_info(State(registry): State<AppState>) -> Json<ChainInfoResponse> {
    let info = registry.chain_info();
    Json(ChainInfoResponse {
        height: info.height.map_or(-1, |h| h as i64),
        blocks: info.blocks,
        latest_hash: info.latest_hash,
    })
}
