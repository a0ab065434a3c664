//! Transactions screen controller.
//!
//! Composes the list engine and the receipt coordinator into the operations
//! the history screen needs: mount, infinite scroll, create/edit form
//! sessions, and delete. Rendering is someone else's job; outcomes the user
//! should see are queued as [`UiEvent`]s for the view layer to drain.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, warn};

use crate::domain::commands::{CreateTransactionCommand, UpdateTransactionCommand};
use crate::domain::models::{Transaction, TransactionKind, TransactionSummary};
use crate::engine::list::{PagedTransactionList, TransactionListEngine};
use crate::engine::receipt::{ReceiptCoordinator, ReceiptPolicy};
use crate::service::traits::{ReceiptStore, TransactionGateway};

/// User-visible outcome of an operation, in toast/alert shape.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The operation did not happen; the user may retry.
    Error(String),
    /// The operation happened, with a caveat worth surfacing.
    Warning(String),
}

/// What the create/edit form submits. Flow direction is not part of the
/// form; it always follows the kind.
#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub alias: Option<String>,
    pub date: String,
    pub kind: TransactionKind,
    pub value: f64,
}

struct FormSession {
    /// Set when editing an existing transaction, absent for the create flow.
    editing_id: Option<String>,
}

pub struct TransactionsScreen<G: TransactionGateway, S: ReceiptStore> {
    user_id: String,
    gateway: Arc<G>,
    store: Arc<S>,
    engine: TransactionListEngine<G>,
    receipt: ReceiptCoordinator,
    session: Option<FormSession>,
    is_submitting: bool,
    events: Vec<UiEvent>,
}

impl<G: TransactionGateway, S: ReceiptStore> TransactionsScreen<G, S> {
    pub fn new(user_id: impl Into<String>, gateway: Arc<G>, store: Arc<S>) -> Self {
        Self {
            user_id: user_id.into(),
            engine: TransactionListEngine::new(gateway.clone()),
            gateway,
            store,
            receipt: ReceiptCoordinator::new(ReceiptPolicy::default()),
            session: None,
            is_submitting: false,
            events: Vec::new(),
        }
    }

    pub fn list(&self) -> &PagedTransactionList {
        self.engine.list()
    }

    pub fn items(&self) -> &[Transaction] {
        self.engine.items()
    }

    pub fn receipt(&self) -> &ReceiptCoordinator {
        &self.receipt
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Drain the queued user-visible events, oldest first.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_error(&mut self, message: &str) {
        self.events.push(UiEvent::Error(message.to_string()));
    }

    /// First-page load; safe to call again on re-render.
    pub async fn mount(&mut self) {
        if let Err(e) = self.engine.load_first_page().await {
            error!("initial transaction load failed: {e:#}");
            self.push_error("Could not load your transactions.");
        }
    }

    /// Scroll-end trigger. The engine drops duplicate triggers itself.
    pub async fn load_more(&mut self) {
        if let Err(e) = self.engine.load_next_page().await {
            error!("page load failed: {e:#}");
            self.push_error("Could not load more transactions.");
        }
    }

    pub async fn summary(&self) -> Result<TransactionSummary> {
        self.gateway.summary().await
    }

    /// Fetch one transaction fresh from the server, list state aside.
    pub async fn transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        self.gateway.get(transaction_id).await
    }

    pub fn open_create_form(&mut self) {
        self.receipt.clear();
        self.session = Some(FormSession { editing_id: None });
    }

    /// Open the form over an existing transaction and look up any stored
    /// receipt. A failed lookup only means the form shows no attachment,
    /// exactly as if none existed.
    pub async fn open_edit_form(&mut self, transaction_id: &str) {
        self.receipt.clear();
        self.session = Some(FormSession {
            editing_id: Some(transaction_id.to_string()),
        });
        if let Err(e) = self
            .receipt
            .resolve_existing_url(&*self.store, &self.user_id, transaction_id)
            .await
        {
            warn!(transaction_id, "receipt lookup failed: {e:#}");
        }
    }

    /// Close the form, discarding any pending receipt blob.
    pub fn close_form(&mut self) {
        self.receipt.clear();
        self.session = None;
    }

    /// Attach a picked file to the open form. Rejections (size, type) are
    /// reported inline and change nothing.
    pub fn select_receipt(&mut self, data: Vec<u8>, file_name: &str, content_type: &str) {
        if self.session.is_none() {
            warn!("receipt selected with no form open");
            return;
        }
        if let Err(e) = self.receipt.select_file(data, file_name, content_type) {
            self.push_error(&e.to_string());
        }
    }

    /// Remove the form's attachment; deletes from storage when the
    /// transaction already exists.
    pub async fn remove_receipt(&mut self) {
        let editing_id = match &self.session {
            Some(session) => session.editing_id.clone(),
            None => return,
        };
        if let Err(e) = self
            .receipt
            .remove_file(&*self.store, &self.user_id, editing_id.as_deref())
            .await
        {
            error!("receipt removal failed: {e:#}");
            self.push_error("Could not remove the receipt.");
        }
    }

    /// Submit the open form: persist the transaction, then upload any
    /// pending receipt keyed by the saved id, then merge the result into the
    /// list. Save and upload are independent units of failure; a failed
    /// upload is a warning, never a rollback.
    pub async fn save(&mut self, form: TransactionForm) {
        if self.is_submitting {
            return;
        }
        let Some(editing_id) = self.session.as_ref().map(|s| s.editing_id.clone()) else {
            warn!("save requested with no form open");
            return;
        };

        self.is_submitting = true;
        let result = self.submit(form, editing_id.as_deref()).await;
        self.is_submitting = false;

        let saved = match result {
            Ok(saved) => saved,
            Err(SubmitError::Validation(message)) => {
                self.push_error(&message);
                return;
            }
            Err(SubmitError::Gateway(e)) => {
                error!("transaction save failed: {e:#}");
                self.push_error("Could not save the transaction. Please try again.");
                return;
            }
        };

        if self.receipt.has_pending() {
            if let Err(e) = self
                .receipt
                .confirm_after_save(&*self.store, &self.user_id, &saved.id)
                .await
            {
                warn!(id = %saved.id, "receipt upload after save failed: {e:#}");
                self.events.push(UiEvent::Warning(
                    "Transaction saved, but the receipt upload failed.".to_string(),
                ));
            }
        }

        if editing_id.is_some() {
            self.engine.reconcile_updated(saved);
        } else {
            self.engine.reconcile_created(saved);
        }
        self.close_form();
    }

    async fn submit(
        &mut self,
        form: TransactionForm,
        editing_id: Option<&str>,
    ) -> Result<Transaction, SubmitError> {
        match editing_id {
            Some(id) => {
                // The alias always travels on edit; a cleared one must
                // overwrite the stored value, not leave it in place.
                let cmd = UpdateTransactionCommand {
                    alias: Some(form.alias.unwrap_or_default()),
                    date: Some(form.date),
                    kind: Some(form.kind),
                    value: Some(form.value),
                }
                .validated()
                .map_err(|e| SubmitError::Validation(e.to_string()))?;
                self.gateway
                    .update(id, cmd)
                    .await
                    .map_err(SubmitError::Gateway)
            }
            None => {
                let cmd = CreateTransactionCommand {
                    alias: form.alias,
                    date: form.date,
                    kind: form.kind,
                    value: form.value,
                }
                .validated()
                .map_err(|e| SubmitError::Validation(e.to_string()))?;
                self.gateway.create(cmd).await.map_err(SubmitError::Gateway)
            }
        }
    }

    /// Delete is confirm-then-remove: the item leaves the list only after
    /// the server acknowledged the delete.
    pub async fn delete(&mut self, transaction_id: &str) {
        match self.gateway.delete(transaction_id).await {
            Ok(true) => self.engine.reconcile_deleted(transaction_id),
            Ok(false) => {
                warn!(transaction_id, "server declined to delete the transaction");
            }
            Err(e) => {
                error!(transaction_id, "delete failed: {e:#}");
                self.push_error("Could not delete the transaction.");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn force_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }
}

enum SubmitError {
    Validation(String),
    Gateway(anyhow::Error),
}
