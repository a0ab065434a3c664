//! Gateway traits for the external services the client consumes.
//!
//! The engines and screen controller only ever see these traits, so the
//! transport (GraphQL over HTTP in production, in-memory fakes in tests) can
//! change without touching any business logic.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::commands::{
    CreateTransactionCommand, TransactionListQuery, TransactionPage, UpdateTransactionCommand,
};
use crate::domain::models::{Transaction, TransactionSummary};

/// The transaction service: the single source of truth for persisted
/// transactions. The client never stores them durably.
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Fetch one page of transactions, newest first.
    async fn list(&self, query: TransactionListQuery) -> Result<TransactionPage>;

    /// Fetch a single transaction by id, if it exists.
    async fn get(&self, id: &str) -> Result<Option<Transaction>>;

    /// Persist a new transaction; the server assigns the id.
    async fn create(&self, cmd: CreateTransactionCommand) -> Result<Transaction>;

    /// Apply a partial update and return the updated record.
    async fn update(&self, id: &str, cmd: UpdateTransactionCommand) -> Result<Transaction>;

    /// Delete a transaction. `Ok(false)` means the server refused or the id
    /// was unknown; the caller must not remove anything locally in that case.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Current balance plus per-kind totals for the dashboard.
    async fn summary(&self) -> Result<TransactionSummary>;
}

/// Object storage holding at most one receipt per transaction, under the key
/// convention `"{user_id}/{transaction_id}.{extension}"`.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Store `data` under `key`, overwriting any previous object, and return
    /// its download URL.
    async fn upload(&self, data: &[u8], key: &str, content_type: &str) -> Result<String>;

    /// Delete the object at `key`. Idempotent: an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Download URL for the object at `key`, or `None` if absent.
    async fn resolve_url(&self, key: &str) -> Result<Option<String>>;
}
