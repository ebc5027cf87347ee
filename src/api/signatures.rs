//! Signature API Module
//!
//! Handlers for the `/signatures` resource collection. Store errors are
//! answered directly with the matching status: validation failures with
//! 400, unknown ids with 404.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use warp::{http::StatusCode, reply::Response, Reply};

use crate::api::generic::ApiResponse;
use crate::storage::{NewSignature, Signature, SignaturePatch, SignatureStore, StoreError};

// ============================================================================
// RESPONSE STRUCTURES
// ============================================================================

/// Response data for the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureListResponse {
    /// All signatures in insertion order
    pub signatures: Vec<Signature>,
}

/// Response data for single-record endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureResponse {
    pub signature: Signature,
}

// ============================================================================
// HELPERS
// ============================================================================

fn json_reply<T: Serialize>(data: T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(&ApiResponse::ok(data)), status).into_response()
}

/// Maps a store error to its HTTP status and error body.
fn store_error_reply(err: StoreError) -> Response {
    let status = match err {
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::IdsExhausted => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!("Signature request failed: {}", err);
    warp::reply::with_status(
        warp::reply::json(&ApiResponse::<()>::err(err.to_string())),
        status,
    )
    .into_response()
}

// ============================================================================
// API HANDLERS
// ============================================================================

/// Handler for GET /signatures.
///
/// Returns every signature in insertion order. No pagination or filtering.
pub async fn list_signatures_handler(
    store: Arc<SignatureStore>,
) -> Result<Response, warp::Rejection> {
    let signatures = store.list().await;
    Ok(json_reply(SignatureListResponse { signatures }, StatusCode::OK))
}

/// Handler for POST /signatures.
///
/// # Returns
///
/// * `201 Created` with the stored signature (including its `epochId`)
/// * `400 Bad Request` if `name` is missing
pub async fn create_signature_handler(
    request: NewSignature,
    store: Arc<SignatureStore>,
) -> Result<Response, warp::Rejection> {
    match store.create(request).await {
        Ok(signature) => Ok(json_reply(SignatureResponse { signature }, StatusCode::CREATED)),
        Err(e) => Ok(store_error_reply(e)),
    }
}

/// Handler for GET /signatures/:epochId.
pub async fn get_signature_handler(
    epoch_id: u64,
    store: Arc<SignatureStore>,
) -> Result<Response, warp::Rejection> {
    match store.get(epoch_id).await {
        Ok(signature) => Ok(json_reply(SignatureResponse { signature }, StatusCode::OK)),
        Err(e) => Ok(store_error_reply(e)),
    }
}

/// Handler for PUT /signatures/:epochId.
///
/// Only the fields present in the body are changed.
pub async fn update_signature_handler(
    epoch_id: u64,
    patch: SignaturePatch,
    store: Arc<SignatureStore>,
) -> Result<Response, warp::Rejection> {
    match store.update(epoch_id, patch).await {
        Ok(signature) => Ok(json_reply(SignatureResponse { signature }, StatusCode::OK)),
        Err(e) => Ok(store_error_reply(e)),
    }
}

/// Handler for DELETE /signatures/:epochId.
///
/// # Returns
///
/// * `204 No Content` on success
/// * `404 Not Found` if no signature has that id
pub async fn delete_signature_handler(
    epoch_id: u64,
    store: Arc<SignatureStore>,
) -> Result<Response, warp::Rejection> {
    match store.delete(epoch_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Ok(store_error_reply(e)),
    }
}
