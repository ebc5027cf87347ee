//! Signature Store Service Library
//!
//! This crate provides an in-memory store of signatures (name/message
//! records keyed by a timestamp-derived `epochId`) and a JSON REST API
//! over it. State lives only in process memory.

pub mod api;
pub mod config;
pub mod storage;

// Re-export commonly used types
pub use api::{ApiResponse, ApiServer};
pub use config::{ApiConfig, Config};
pub use storage::{NewSignature, Signature, SignaturePatch, SignatureStore, StoreError};
