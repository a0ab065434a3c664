//! Transaction list engine.
//!
//! Owns the paginated, date-descending view of the user's transactions and
//! keeps it correct across page loads and single-item writes without ever
//! refetching the whole list. Confirmed creates/updates/deletes are merged
//! in place through the ordering rules in [`crate::domain::ordering`].

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domain::commands::{TransactionListQuery, PAGE_SIZE};
use crate::domain::models::Transaction;
use crate::domain::ordering::{insert_in_order, update_and_reorder};
use crate::service::traits::TransactionGateway;

/// Client-side view state over the server's transaction list.
///
/// `items` is non-increasing by date, newest first. `page` is the last
/// successfully fetched 1-based page.
#[derive(Debug, Clone)]
pub struct PagedTransactionList {
    pub items: Vec<Transaction>,
    pub page: u32,
    pub has_more: bool,
    pub is_loading: bool,
}

impl Default for PagedTransactionList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: true,
            is_loading: false,
        }
    }
}

pub struct TransactionListEngine<G: TransactionGateway> {
    gateway: Arc<G>,
    list: PagedTransactionList,
    initial_loaded: bool,
}

impl<G: TransactionGateway> TransactionListEngine<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            list: PagedTransactionList::default(),
            initial_loaded: false,
        }
    }

    pub fn list(&self) -> &PagedTransactionList {
        &self.list
    }

    pub fn items(&self) -> &[Transaction] {
        &self.list.items
    }

    /// Fetch page 1 and replace the view wholesale. One-shot: repeated
    /// triggers (a re-rendering screen firing mount twice) are no-ops, so
    /// the fetch happens exactly once per engine lifetime.
    pub async fn load_first_page(&mut self) -> Result<()> {
        if self.initial_loaded {
            return Ok(());
        }
        self.initial_loaded = true;
        self.fetch_page(1, false).await
    }

    /// Fetch the next page and append it. Dropped (not queued) while a fetch
    /// is in flight or when the server said there is nothing further.
    pub async fn load_next_page(&mut self) -> Result<()> {
        if self.list.is_loading || !self.list.has_more {
            return Ok(());
        }
        let next = self.list.page + 1;
        self.fetch_page(next, true).await
    }

    async fn fetch_page(&mut self, page: u32, append: bool) -> Result<()> {
        self.list.is_loading = true;
        let result = self
            .gateway
            .list(TransactionListQuery {
                page,
                limit: PAGE_SIZE,
            })
            .await;
        // Reset before propagating either outcome so a failure can never
        // leave the view stuck loading.
        self.list.is_loading = false;

        let fetched = result.with_context(|| format!("failed to fetch transactions page {page}"))?;
        info!(
            page = fetched.page,
            count = fetched.items.len(),
            has_more = fetched.has_more,
            "fetched transaction page"
        );
        self.list.page = fetched.page;
        self.list.has_more = fetched.has_more;
        if append {
            // Server pages are already ordered and contiguous with our tail.
            self.list.items.extend(fetched.items);
        } else {
            self.list.items = fetched.items;
        }
        Ok(())
    }

    /// Merge a transaction the server just confirmed as created. The new
    /// item may be dated anywhere relative to the visible window, so it is
    /// spliced into order rather than prepended.
    pub fn reconcile_created(&mut self, transaction: Transaction) {
        info!(id = %transaction.id, "merging created transaction");
        self.list.items = insert_in_order(&self.list.items, transaction);
    }

    /// Merge a confirmed edit. An id we are not currently showing is treated
    /// as a create; otherwise the item is replaced and the list reordered,
    /// since a date edit can move it.
    pub fn reconcile_updated(&mut self, transaction: Transaction) {
        if !self.list.items.iter().any(|t| t.id == transaction.id) {
            warn!(id = %transaction.id, "updated transaction not in view, inserting");
            self.reconcile_created(transaction);
            return;
        }
        info!(id = %transaction.id, "merging updated transaction");
        self.list.items = update_and_reorder(&self.list.items, transaction);
    }

    /// Remove a transaction the server confirmed as deleted. Unknown ids are
    /// a silent no-op (double-tap protection).
    pub fn reconcile_deleted(&mut self, id: &str) {
        let before = self.list.items.len();
        self.list.items.retain(|t| t.id != id);
        if self.list.items.len() == before {
            warn!(id, "deleted transaction was not in view");
        }
    }

    #[cfg(test)]
    pub(crate) fn force_loading(&mut self, loading: bool) {
        self.list.is_loading = loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TransactionKind;
    use crate::domain::ordering::compare_dates;
    use crate::service::test_utils::{sample_tx, FakeGateway};
    use std::cmp::Ordering;

    /// 25 transactions dated newest-first through January 2025.
    fn dataset() -> Vec<Transaction> {
        (0..25)
            .map(|i| sample_tx(&format!("t{i}"), &format!("{:02}/01/2025", 28 - i)))
            .collect()
    }

    fn engine_with(dataset: Vec<Transaction>) -> (TransactionListEngine<FakeGateway>, Arc<FakeGateway>) {
        let gateway = Arc::new(FakeGateway::new(dataset));
        (TransactionListEngine::new(gateway.clone()), gateway)
    }

    fn assert_ordered(items: &[Transaction]) {
        for pair in items.windows(2) {
            assert_ne!(
                compare_dates(&pair[0].date, &pair[1].date),
                Ordering::Greater,
                "items out of order: {} before {}",
                pair[0].date,
                pair[1].date
            );
        }
    }

    #[tokio::test]
    async fn first_page_replaces_items_and_sets_pagination() {
        let (mut engine, _) = engine_with(dataset());
        engine.load_first_page().await.unwrap();
        assert_eq!(engine.items().len(), 10);
        assert_eq!(engine.list().page, 1);
        assert!(engine.list().has_more);
        assert!(!engine.list().is_loading);
    }

    #[tokio::test]
    async fn first_load_is_idempotent() {
        let (mut engine, gateway) = engine_with(dataset());
        engine.load_first_page().await.unwrap();
        engine.load_first_page().await.unwrap();
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn failed_first_load_leaves_items_empty_and_loading_reset() {
        let (mut engine, gateway) = engine_with(dataset());
        gateway.fail_list(true);
        assert!(engine.load_first_page().await.is_err());
        assert!(engine.items().is_empty());
        assert!(!engine.list().is_loading);
    }

    #[tokio::test]
    async fn next_page_appends_in_server_order() {
        let (mut engine, _) = engine_with(dataset());
        engine.load_first_page().await.unwrap();
        engine.load_next_page().await.unwrap();
        assert_eq!(engine.items().len(), 20);
        assert_eq!(engine.list().page, 2);
        assert!(engine.list().has_more);
        assert_ordered(engine.items());

        engine.load_next_page().await.unwrap();
        assert_eq!(engine.items().len(), 25);
        assert!(!engine.list().has_more);
    }

    #[tokio::test]
    async fn load_more_is_dropped_while_in_flight() {
        let (mut engine, gateway) = engine_with(dataset());
        engine.load_first_page().await.unwrap();
        let calls_before = gateway.list_calls();
        engine.force_loading(true);
        engine.load_next_page().await.unwrap();
        assert_eq!(gateway.list_calls(), calls_before);
    }

    #[tokio::test]
    async fn load_more_is_dropped_when_exhausted() {
        let (mut engine, gateway) = engine_with(vec![sample_tx("t0", "10/01/2025")]);
        engine.load_first_page().await.unwrap();
        assert!(!engine.list().has_more);
        engine.load_next_page().await.unwrap();
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn failed_next_page_preserves_existing_items() {
        let (mut engine, gateway) = engine_with(dataset());
        engine.load_first_page().await.unwrap();
        gateway.fail_list(true);
        assert!(engine.load_next_page().await.is_err());
        assert_eq!(engine.items().len(), 10);
        assert_eq!(engine.list().page, 1);
        assert!(!engine.list().is_loading);
    }

    #[tokio::test]
    async fn created_transaction_is_spliced_into_order() {
        let (mut engine, _) = engine_with(vec![
            sample_tx("a", "12/01/2025"),
            sample_tx("b", "05/01/2025"),
        ]);
        engine.load_first_page().await.unwrap();
        engine.reconcile_created(sample_tx("c", "10/01/2025"));
        let dates: Vec<&str> = engine.items().iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["12/01/2025", "10/01/2025", "05/01/2025"]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_behaves_as_create() {
        let (mut engine, _) = engine_with(vec![sample_tx("a", "12/01/2025")]);
        engine.load_first_page().await.unwrap();
        engine.reconcile_updated(sample_tx("ghost", "20/01/2025"));
        assert_eq!(engine.items().len(), 2);
        assert_eq!(engine.items()[0].id, "ghost");
    }

    #[tokio::test]
    async fn date_edit_reorders_the_view() {
        let (mut engine, _) = engine_with(vec![
            sample_tx("a", "15/01/2025"),
            sample_tx("b", "10/01/2025"),
            sample_tx("c", "05/01/2025"),
        ]);
        engine.load_first_page().await.unwrap();
        let mut edited = sample_tx("b", "20/01/2025");
        edited.kind = TransactionKind::Payment;
        edited.flow = TransactionKind::Payment.flow();
        engine.reconcile_updated(edited);
        assert_eq!(engine.items()[0].id, "b");
        assert_ordered(engine.items());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_missing_id_is_a_no_op() {
        let (mut engine, _) = engine_with(vec![
            sample_tx("a", "12/01/2025"),
            sample_tx("b", "05/01/2025"),
        ]);
        engine.load_first_page().await.unwrap();
        engine.reconcile_deleted("a");
        assert_eq!(engine.items().len(), 1);
        engine.reconcile_deleted("missing-id");
        assert_eq!(engine.items().len(), 1);
        assert_eq!(engine.items()[0].id, "b");
    }

    #[tokio::test]
    async fn ordering_invariant_survives_mixed_reconciliation() {
        let (mut engine, _) = engine_with(dataset());
        engine.load_first_page().await.unwrap();
        engine.reconcile_created(sample_tx("new1", "25/01/2025"));
        engine.reconcile_created(sample_tx("new2", "01/01/2025"));
        engine.reconcile_updated(sample_tx("t3", "02/01/2025"));
        engine.reconcile_deleted("t5");
        assert_ordered(engine.items());
    }
}
