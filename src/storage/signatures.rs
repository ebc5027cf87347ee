//! Signature Storage Module
//!
//! This module provides in-memory storage for signatures. Records are kept
//! in insertion order and keyed by their `epochId`, which the store assigns
//! at creation time and never reissues.

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A named message record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Unique identifier assigned by the store at creation
    pub epoch_id: u64,
    /// Name of the signer
    pub name: String,
    /// Optional message left by the signer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Payload for creating a signature.
///
/// `name` is optional here so that a missing name is reported as a
/// validation failure instead of a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSignature {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Partial update for an existing signature.
///
/// Fields left as `None` are not touched by [`SignaturePatch::apply`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignaturePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SignaturePatch {
    /// Merges the provided fields into `signature`.
    pub fn apply(&self, signature: &mut Signature) {
        if let Some(name) = &self.name {
            signature.name = name.clone();
        }
        if let Some(message) = &self.message {
            signature.message = Some(message.clone());
        }
    }
}

/// Errors returned by [`SignatureStore`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Signature {0} not found")]
    NotFound(u64),

    #[error("No epoch ids left to assign")]
    IdsExhausted,
}

// ============================================================================
// STORAGE IMPLEMENTATION
// ============================================================================

struct Inner {
    /// Map of epoch_id -> Signature, in insertion order
    signatures: IndexMap<u64, Signature>,
    /// Highest id ever issued or loaded; ids are never handed out twice
    last_epoch_id: u64,
}

impl Inner {
    fn next_epoch_id(&mut self) -> Result<u64, StoreError> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let floor = self
            .last_epoch_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        let epoch_id = now.max(floor);
        self.last_epoch_id = epoch_id;
        Ok(epoch_id)
    }
}

/// In-memory storage for signatures.
///
/// Thread-safe via RwLock. Each operation holds the lock for its whole
/// duration, so operations never interleave.
pub struct SignatureStore {
    inner: RwLock<Inner>,
}

impl SignatureStore {
    /// Create a new, empty signature store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                signatures: IndexMap::new(),
                last_epoch_id: 0,
            }),
        }
    }

    /// Get all signatures in insertion order.
    pub async fn list(&self) -> Vec<Signature> {
        let inner = self.inner.read().await;
        inner.signatures.values().cloned().collect()
    }

    /// Create a signature from the given payload.
    ///
    /// # Arguments
    ///
    /// * `new_signature` - Name (required) and message (optional)
    ///
    /// # Returns
    ///
    /// * `Ok(Signature)` - The stored record, including its assigned id
    /// * `Err(StoreError::Validation)` - `name` is missing or blank
    /// * `Err(StoreError::IdsExhausted)` - the highest id is already `u64::MAX`
    pub async fn create(&self, new_signature: NewSignature) -> Result<Signature, StoreError> {
        let name = match new_signature.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                warn!("Rejected signature without a name");
                return Err(StoreError::Validation("name is required".to_string()));
            }
        };

        let mut inner = self.inner.write().await;
        let epoch_id = match inner.next_epoch_id() {
            Ok(epoch_id) => epoch_id,
            Err(e) => {
                error!("Cannot create signature: {}", e);
                return Err(e);
            }
        };
        let signature = Signature {
            epoch_id,
            name,
            message: new_signature.message,
        };
        inner.signatures.insert(epoch_id, signature.clone());

        info!("Created signature {}", epoch_id);
        Ok(signature)
    }

    /// Get a signature by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Signature)` if found
    /// * `Err(StoreError::NotFound)` if no record has that id
    pub async fn get(&self, epoch_id: u64) -> Result<Signature, StoreError> {
        let inner = self.inner.read().await;
        inner
            .signatures
            .get(&epoch_id)
            .cloned()
            .ok_or(StoreError::NotFound(epoch_id))
    }

    /// Merge `patch` into the signature with the given id.
    ///
    /// # Returns
    ///
    /// * `Ok(Signature)` - The updated record
    /// * `Err(StoreError::NotFound)` - No record has that id
    pub async fn update(
        &self,
        epoch_id: u64,
        patch: SignaturePatch,
    ) -> Result<Signature, StoreError> {
        let mut inner = self.inner.write().await;
        let signature = inner
            .signatures
            .get_mut(&epoch_id)
            .ok_or(StoreError::NotFound(epoch_id))?;

        patch.apply(signature);

        info!("Updated signature {}", epoch_id);
        Ok(signature.clone())
    }

    /// Remove the signature with the given id.
    ///
    /// Order of the remaining records is preserved.
    pub async fn delete(&self, epoch_id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .signatures
            .shift_remove(&epoch_id)
            .ok_or(StoreError::NotFound(epoch_id))?;

        info!("Deleted signature {}", epoch_id);
        Ok(())
    }

    /// Replace the whole collection with `signatures`.
    ///
    /// Used to put the store into a known state (typically empty) before a
    /// test run. The id high-water mark only moves forward, so ids issued
    /// before the reset are still never reissued. If the list repeats an
    /// id, the later record wins.
    pub async fn reset_all(&self, signatures: Vec<Signature>) {
        let mut inner = self.inner.write().await;
        let max_loaded = signatures.iter().map(|s| s.epoch_id).max().unwrap_or(0);
        inner.last_epoch_id = inner.last_epoch_id.max(max_loaded);
        inner.signatures = signatures.into_iter().map(|s| (s.epoch_id, s)).collect();

        info!("Reset signature store ({} records)", inner.signatures.len());
    }
}

impl Default for SignatureStore {
    fn default() -> Self {
        Self::new()
    }
}
