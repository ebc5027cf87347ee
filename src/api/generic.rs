//! Generic API structures and server
//!
//! This module contains the shared response envelope, rejection handling,
//! CORS setup, and the [`ApiServer`] that wires the signature routes together.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};
use warp::hyper::body::Bytes;
use warp::{
    http::{Method, StatusCode},
    Filter, Rejection, Reply,
};

use super::signatures;
use crate::config::Config;
use crate::storage::{NewSignature, SignaturePatch, SignatureStore};

// ============================================================================
// SHARED REQUEST/RESPONSE STRUCTURES
// ============================================================================

/// Standardized response structure for all API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    pub data: Option<T>,
    /// Error message (if failed)
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// WARP FILTER HELPERS
// ============================================================================

/// Creates a warp filter that injects the signature store into handlers.
pub fn with_store(
    store: Arc<SignatureStore>,
) -> impl Filter<Extract = (Arc<SignatureStore>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || store.clone())
}

/// Deserializes a raw JSON body, logging it at debug level.
///
/// Failures become a [`JsonDeserializeError`] rejection (400).
fn parse_json_body<T: serde::de::DeserializeOwned>(
    route: &str,
    body: &Bytes,
) -> Result<T, Rejection> {
    let body_str = String::from_utf8_lossy(body);
    debug!("{} - Received body: {}", route, body_str);

    serde_json::from_slice::<T>(body).map_err(|e| {
        error!("{} deserialization failed: {}. Body: {}", route, e, body_str);
        warp::reject::custom(JsonDeserializeError(format!("Invalid JSON: {}", e)))
    })
}

// ============================================================================
// CUSTOM REJECTION TYPES
// ============================================================================

/// Custom rejection for JSON deserialization errors
#[derive(Debug)]
pub struct JsonDeserializeError(pub String);

impl warp::reject::Reject for JsonDeserializeError {}

// ============================================================================
// CORS CONFIGURATION
// ============================================================================

/// Creates a CORS filter based on the configured allowed origins.
fn create_cors_filter(allowed_origins: &[String]) -> warp::cors::Builder {
    let methods = vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if allowed_origins.iter().any(|origin| origin == "*") {
        warp::cors()
            .allow_any_origin()
            .allow_methods(methods)
            .allow_headers(vec!["content-type"])
    } else {
        let origins: Vec<&str> = allowed_origins.iter().map(|s| s.as_str()).collect();
        warp::cors()
            .allow_origins(origins)
            .allow_methods(methods)
            .allow_headers(vec!["content-type"])
    }
}

// ============================================================================
// REJECTION HANDLER
// ============================================================================

/// Global rejection handler for all API routes.
///
/// Converts warp rejections into [`ApiResponse`] error bodies with the
/// matching HTTP status code.
pub async fn handle_rejection(rej: Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let (status, message) = if let Some(err) = rej.find::<JsonDeserializeError>() {
        (StatusCode::BAD_REQUEST, err.0.clone())
    } else if let Some(err) = rej.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", err))
    } else if let Some(err) = rej.find::<warp::cors::CorsForbidden>() {
        (StatusCode::FORBIDDEN, err.to_string())
    } else if rej.is_not_found() {
        (StatusCode::NOT_FOUND, "Endpoint not found".to_string())
    } else if rej.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        error!("Unhandled rejection: {:?}", rej);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ApiResponse::<()>::err(message)),
        status,
    ))
}

// ============================================================================
// API SERVER IMPLEMENTATION
// ============================================================================

/// REST API server for the signature store service.
pub struct ApiServer {
    /// Service configuration
    config: Arc<Config>,
    /// Signature store shared by all handlers
    store: Arc<SignatureStore>,
}

impl ApiServer {
    /// Creates a new API server with an empty signature store.
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(SignatureStore::new()))
    }

    /// Creates a new API server backed by an existing store.
    ///
    /// Lets callers keep a handle on the store, e.g. to reset it between tests.
    pub fn with_store(config: Config, store: Arc<SignatureStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a handle to the store backing this server.
    pub fn store(&self) -> Arc<SignatureStore> {
        self.store.clone()
    }

    /// Starts the API server and serves requests until `shutdown` resolves.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Server shut down cleanly
    /// * `Err(anyhow::Error)` - Invalid address or failed to bind
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: std::net::SocketAddr = format!("{}:{}", self.config.api.host, self.config.api.port)
            .parse()
            .context("Failed to parse API server address")?;

        let routes = self.create_routes();

        let (bound_addr, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(addr, shutdown)
            .with_context(|| format!("Failed to bind API server to {}", addr))?;

        info!("API server listening on {}", bound_addr);
        server.await;
        info!("API server stopped");

        Ok(())
    }

    /// Creates all API routes for the server.
    ///
    /// # Returns
    ///
    /// A warp filter containing all API routes
    pub(crate) fn create_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        let store = self.store.clone();

        // Health check endpoint - returns service status
        let health = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| {
                warp::reply::json(&ApiResponse::ok(
                    "Signature Store Service is running".to_string(),
                ))
            });

        // GET /signatures - List all signatures
        let list = warp::path("signatures")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(signatures::list_signatures_handler);

        // POST /signatures - Create a signature
        let create_store = store.clone();
        let create = warp::path("signatures")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::bytes())
            .and_then(move |body: Bytes| {
                let store = create_store.clone();
                async move {
                    let request: NewSignature = parse_json_body("POST /signatures", &body)?;
                    signatures::create_signature_handler(request, store).await
                }
            });

        // GET /signatures/:epochId - Get a signature by id
        let get = warp::path("signatures")
            .and(warp::path::param::<u64>())
            .and(warp::path::end())
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(signatures::get_signature_handler);

        // PUT /signatures/:epochId - Partially update a signature
        let update_store = store.clone();
        let update = warp::path("signatures")
            .and(warp::path::param::<u64>())
            .and(warp::path::end())
            .and(warp::put())
            .and(warp::body::bytes())
            .and_then(move |epoch_id: u64, body: Bytes| {
                let store = update_store.clone();
                async move {
                    let route = format!("PUT /signatures/{}", epoch_id);
                    let patch: SignaturePatch = parse_json_body(&route, &body)?;
                    signatures::update_signature_handler(epoch_id, patch, store).await
                }
            });

        // DELETE /signatures/:epochId - Delete a signature
        let delete = warp::path("signatures")
            .and(warp::path::param::<u64>())
            .and(warp::path::end())
            .and(warp::delete())
            .and(with_store(store))
            .and_then(signatures::delete_signature_handler);

        // Combine all routes and apply rejection handler
        health
            .or(list)
            .or(create)
            .or(get)
            .or(update)
            .or(delete)
            .with(create_cors_filter(&self.config.api.cors_origins))
            .with(warp::trace::request())
            .recover(handle_rejection)
    }

    /// Public method for testing - exposes routes for integration tests
    pub fn test_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        self.create_routes()
    }
}
