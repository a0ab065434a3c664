//! Deferred receipt upload coordinator.
//!
//! A receipt can be picked before its transaction exists, so there is no id
//! to key the file by yet. The coordinator holds the blob client-side,
//! lets the save happen first, then uploads under
//! `"{user_id}/{transaction_id}.{ext}"`. The upload is an independent unit
//! of failure: a transaction that saved stays saved even when its receipt
//! does not make it. The fixed naming convention guarantees at most one
//! receipt per transaction (a re-upload overwrites).
//!
//! Replacing an attachment while editing follows the same deferred path as
//! the create flow, so there is a single upload site.

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, warn};

use crate::service::traits::ReceiptStore;

/// Extensions probed, in order, when looking up an existing receipt.
pub const RECEIPT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "gif", "webp"];

const DEFAULT_MAX_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// File-selection limits, checked before anything touches the network.
#[derive(Debug, Clone)]
pub struct ReceiptPolicy {
    pub max_size_bytes: usize,
    pub accepted_types: Vec<String>,
}

impl Default for ReceiptPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            accepted_types: vec!["application/pdf".to_string()],
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ReceiptError {
    #[error("file is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
    #[error("file type {0:?} is not accepted")]
    UnsupportedType(String),
}

/// Lifecycle of the attachment within one form session.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptState {
    /// No file selected and none known to exist in storage.
    Empty,
    /// A file is held client-side, waiting for the transaction to be saved.
    Pending { file_name: String },
    /// The upload call is in flight.
    Uploading,
    /// A receipt exists in storage for this transaction.
    Attached { url: String },
    /// The transaction saved but the upload did not. Non-fatal.
    AttachFailed,
}

pub struct ReceiptCoordinator {
    policy: ReceiptPolicy,
    state: ReceiptState,
    pending: Option<PendingReceipt>,
}

struct PendingReceipt {
    data: Vec<u8>,
    file_name: String,
    content_type: String,
}

impl PendingReceipt {
    /// Extension for the storage key, taken from the file name. The wire
    /// default mirrors the accepted-type default.
    fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("pdf")
    }
}

fn receipt_key(user_id: &str, transaction_id: &str, extension: &str) -> String {
    format!("{user_id}/{transaction_id}.{extension}")
}

impl Default for ReceiptCoordinator {
    fn default() -> Self {
        Self::new(ReceiptPolicy::default())
    }
}

impl ReceiptCoordinator {
    pub fn new(policy: ReceiptPolicy) -> Self {
        Self {
            policy,
            state: ReceiptState::Empty,
            pending: None,
        }
    }

    pub fn state(&self) -> &ReceiptState {
        &self.state
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// URL of the attached receipt, when one is known to exist.
    pub fn receipt_url(&self) -> Option<&str> {
        match &self.state {
            ReceiptState::Attached { url } => Some(url),
            _ => None,
        }
    }

    /// Hold a newly picked file client-side. Size and type violations are
    /// rejected before any state changes and nothing is uploaded yet.
    pub fn select_file(
        &mut self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<(), ReceiptError> {
        if data.len() > self.policy.max_size_bytes {
            return Err(ReceiptError::TooLarge {
                size: data.len(),
                limit: self.policy.max_size_bytes,
            });
        }
        if !self
            .policy
            .accepted_types
            .iter()
            .any(|t| t.as_str() == content_type)
        {
            return Err(ReceiptError::UnsupportedType(content_type.to_string()));
        }
        info!(file_name, size = data.len(), "receipt selected, deferring upload");
        self.pending = Some(PendingReceipt {
            data,
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
        });
        self.state = ReceiptState::Pending {
            file_name: file_name.to_string(),
        };
        Ok(())
    }

    /// Upload the pending file now that the transaction has an id. No
    /// pending file is a no-op. Failure moves to `AttachFailed` and returns
    /// the error for independent reporting; the caller must not treat it as
    /// a failed save.
    pub async fn confirm_after_save<S: ReceiptStore>(
        &mut self,
        store: &S,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<String>> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        let key = receipt_key(user_id, transaction_id, pending.extension());
        self.state = ReceiptState::Uploading;
        let result = store
            .upload(&pending.data, &key, &pending.content_type)
            .await;
        match result {
            Ok(url) => {
                info!(key = %key, "receipt uploaded");
                self.state = ReceiptState::Attached { url: url.clone() };
                Ok(Some(url))
            }
            Err(e) => {
                warn!(key = %key, "receipt upload failed: {e:#}");
                self.state = ReceiptState::AttachFailed;
                Err(e).context("transaction saved, but the receipt upload failed")
            }
        }
    }

    /// Drop the attachment. With a transaction id (edit mode) the stored
    /// object is deleted first, probing every keyed extension since exactly
    /// one may exist; without one (create mode) the blob never left the
    /// client and is simply discarded.
    pub async fn remove_file<S: ReceiptStore>(
        &mut self,
        store: &S,
        user_id: &str,
        transaction_id: Option<&str>,
    ) -> Result<()> {
        if let Some(id) = transaction_id {
            if matches!(self.state, ReceiptState::Attached { .. }) {
                for ext in RECEIPT_EXTENSIONS {
                    store
                        .delete(&receipt_key(user_id, id, ext))
                        .await
                        .context("failed to remove the stored receipt")?;
                }
            }
        }
        self.pending = None;
        self.state = ReceiptState::Empty;
        Ok(())
    }

    /// Look for a receipt already in storage for an existing transaction,
    /// trying each extension in the fixed probe order. First hit wins.
    pub async fn resolve_existing_url<S: ReceiptStore>(
        &mut self,
        store: &S,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<String>> {
        for ext in RECEIPT_EXTENSIONS {
            let key = receipt_key(user_id, transaction_id, ext);
            if let Some(url) = store.resolve_url(&key).await? {
                self.state = ReceiptState::Attached { url: url.clone() };
                return Ok(Some(url));
            }
        }
        Ok(None)
    }

    /// Discard all session state, whatever the upload outcome. Called when
    /// the owning form closes.
    pub fn clear(&mut self) {
        self.pending = None;
        self.state = ReceiptState::Empty;
    }
}
