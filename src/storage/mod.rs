//! Storage Module
//!
//! This module provides storage for the signature store service.

pub mod signatures;

// Re-export for convenience
pub use signatures::{NewSignature, Signature, SignaturePatch, SignatureStore, StoreError};
