//! Shared test helpers
//!
//! - **Constants**: dummy names and messages
//! - **Builders**: test configuration, API server, store payloads
//! - **Request helpers**: create a signature through the routes and return its id

#![allow(dead_code)]

use serde_json::json;
use signature_store::api::{ApiResponse, SignatureResponse};
use signature_store::config::{ApiConfig, Config};
use signature_store::storage::{NewSignature, SignaturePatch};
use signature_store::ApiServer;
use warp::http::StatusCode;
use warp::test::request;
use warp::{Filter, Reply};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Dummy signer name
pub const DUMMY_NAME: &str = "Joanna Blogg";

/// Second dummy signer name, for ordering and rename checks
pub const DUMMY_NAME_OTHER: &str = "Fred Bloggs";

/// Dummy message
pub const DUMMY_MESSAGE: &str = "I am on holiday";

/// An id no test ever creates
pub const DUMMY_UNKNOWN_EPOCH_ID: u64 = 42;

// ============================================================================
// BUILDERS
// ============================================================================

/// Build a config suitable for in-process route tests.
pub fn build_test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3999,
            cors_origins: vec!["*".to_string()],
        },
    }
}

/// Create an API server with an empty store.
pub fn create_test_api_server() -> ApiServer {
    ApiServer::new(build_test_config())
}

/// Create payload with only a name.
pub fn new_signature(name: &str) -> NewSignature {
    NewSignature {
        name: Some(name.to_string()),
        message: None,
    }
}

/// Patch that only sets the message.
pub fn message_patch(message: &str) -> SignaturePatch {
    SignaturePatch {
        name: None,
        message: Some(message.to_string()),
    }
}

// ============================================================================
// REQUEST HELPERS
// ============================================================================

/// POST a signature with the given name and return its assigned epochId.
pub async fn post_signature<F>(routes: &F, name: &str) -> u64
where
    F: Filter + 'static,
    F::Extract: Reply + Send,
{
    let response = request()
        .method("POST")
        .path("/signatures")
        .json(&json!({ "name": name }))
        .reply(routes)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: ApiResponse<SignatureResponse> = serde_json::from_slice(response.body()).unwrap();
    body.data.expect("create response should carry data").signature.epoch_id
}
