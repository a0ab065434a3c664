//! In-memory fakes of the external services, shared by the engine and
//! screen tests. Both fakes count calls so tests can assert how many network
//! round-trips an operation would have cost, and both can be scripted to
//! fail on demand.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::domain::commands::{
    CreateTransactionCommand, TransactionListQuery, TransactionPage, UpdateTransactionCommand,
};
use crate::domain::models::{KindBreakdown, Transaction, TransactionKind, TransactionSummary};
use crate::service::traits::{ReceiptStore, TransactionGateway};

pub fn sample_tx(id: &str, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        alias: Some(format!("alias-{id}")),
        date: date.to_string(),
        kind: TransactionKind::Deposit,
        flow: TransactionKind::Deposit.flow(),
        value: 10.0,
    }
}

#[derive(Default)]
struct GatewayState {
    dataset: Vec<Transaction>,
    list_calls: usize,
    create_calls: usize,
    update_calls: usize,
    delete_calls: usize,
    fail_list: bool,
    fail_create: bool,
    fail_update: bool,
    fail_delete: bool,
    delete_result: bool,
    next_id: usize,
}

/// Serves pages out of a fixed newest-first dataset.
pub struct FakeGateway {
    state: Mutex<GatewayState>,
}

impl FakeGateway {
    pub fn new(dataset: Vec<Transaction>) -> Self {
        Self {
            state: Mutex::new(GatewayState {
                dataset,
                delete_result: true,
                ..Default::default()
            }),
        }
    }

    pub fn fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    pub fn fail_update(&self, fail: bool) {
        self.state.lock().unwrap().fail_update = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.state.lock().unwrap().fail_delete = fail;
    }

    /// Make `delete` report that the server did not delete anything.
    pub fn refuse_delete(&self) {
        self.state.lock().unwrap().delete_result = false;
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.state.lock().unwrap().update_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.state.lock().unwrap().delete_calls
    }
}

#[async_trait]
impl TransactionGateway for FakeGateway {
    async fn list(&self, query: TransactionListQuery) -> Result<TransactionPage> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if state.fail_list {
            bail!("list fetch failed");
        }
        let total = state.dataset.len();
        let start = ((query.page - 1) * query.limit) as usize;
        let end = (start + query.limit as usize).min(total);
        let items = if start < total {
            state.dataset[start..end].to_vec()
        } else {
            Vec::new()
        };
        Ok(TransactionPage {
            items,
            page: query.page,
            has_more: end < total,
            total: total as u32,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Transaction>> {
        let state = self.state.lock().unwrap();
        Ok(state.dataset.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, cmd: CreateTransactionCommand) -> Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if state.fail_create {
            bail!("create failed");
        }
        state.next_id += 1;
        Ok(Transaction {
            id: format!("srv-{}", state.next_id),
            alias: cmd.alias,
            date: cmd.date,
            kind: cmd.kind,
            flow: cmd.kind.flow(),
            value: cmd.value,
        })
    }

    async fn update(&self, id: &str, cmd: UpdateTransactionCommand) -> Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        state.update_calls += 1;
        if state.fail_update {
            bail!("update failed");
        }
        let existing = state
            .dataset
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .unwrap_or_else(|| sample_tx(id, "01/01/2025"));
        let kind = cmd.kind.unwrap_or(existing.kind);
        // An empty alias on the wire clears the stored one.
        let alias = match cmd.alias {
            Some(a) if a.is_empty() => None,
            Some(a) => Some(a),
            None => existing.alias,
        };
        Ok(Transaction {
            id: id.to_string(),
            alias,
            date: cmd.date.unwrap_or(existing.date),
            kind,
            flow: kind.flow(),
            value: cmd.value.unwrap_or(existing.value),
        })
    }

    async fn delete(&self, _id: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls += 1;
        if state.fail_delete {
            bail!("delete failed");
        }
        Ok(state.delete_result)
    }

    async fn summary(&self) -> Result<TransactionSummary> {
        let state = self.state.lock().unwrap();
        let balance = state.dataset.iter().map(|t| t.signed_value()).sum();
        Ok(TransactionSummary {
            balance,
            breakdown: KindBreakdown::default(),
        })
    }
}

#[derive(Default)]
struct StoreState {
    objects: HashMap<String, Vec<u8>>,
    upload_calls: usize,
    deleted_keys: Vec<String>,
    resolved_keys: Vec<String>,
    fail_upload: bool,
    fail_delete: bool,
}

/// Key/blob store backed by a map.
#[derive(Default)]
pub struct FakeReceiptStore {
    state: Mutex<StoreState>,
}

impl FakeReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(key: &str, data: &[u8]) -> Self {
        let store = Self::default();
        store
            .state
            .lock()
            .unwrap()
            .objects
            .insert(key.to_string(), data.to_vec());
        store
    }

    pub fn fail_upload(&self, fail: bool) {
        self.state.lock().unwrap().fail_upload = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.state.lock().unwrap().fail_delete = fail;
    }

    pub fn upload_calls(&self) -> usize {
        self.state.lock().unwrap().upload_calls
    }

    pub fn deleted_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_keys.clone()
    }

    pub fn resolved_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().resolved_keys.clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.lock().unwrap().objects.contains_key(key)
    }
}

#[async_trait]
impl ReceiptStore for FakeReceiptStore {
    async fn upload(&self, data: &[u8], key: &str, _content_type: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.upload_calls += 1;
        if state.fail_upload {
            bail!("upload failed");
        }
        state.objects.insert(key.to_string(), data.to_vec());
        Ok(format!("fake://{key}"))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_delete {
            bail!("delete failed");
        }
        state.deleted_keys.push(key.to_string());
        state.objects.remove(key);
        Ok(())
    }

    async fn resolve_url(&self, key: &str) -> Result<Option<String>> {
        let mut state = self.state.lock().unwrap();
        state.resolved_keys.push(key.to_string());
        Ok(state
            .objects
            .contains_key(key)
            .then(|| format!("fake://{key}")))
    }
}
