//! REST API Server Module
//!
//! This module provides the REST API server for the signature store
//! service, exposing CRUD endpoints for the `/signatures` collection.

// Generic shared code (response envelope, rejections, CORS, server)
mod generic;

// Signature resource handlers
mod signatures;

pub use generic::{ApiResponse, ApiServer, JsonDeserializeError};
pub use signatures::{SignatureListResponse, SignatureResponse};
