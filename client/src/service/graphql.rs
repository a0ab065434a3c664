//! GraphQL transport for the transaction service.
//!
//! Requests are plain `{query, variables}` POSTs; the operation documents
//! match the server schema (`transactions`, `createTransaction`,
//! `updateTransaction`, `deleteTransaction`, `getTransactionSummary`).
//! GraphQL-level errors are surfaced as ordinary `anyhow` errors so callers
//! see one failure channel regardless of where the request died.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use shared::{
    GraphQlRequest, GraphQlResponse, PaginatedTransactionsDto, TransactionDto,
    TransactionSummaryDto,
};
use tracing::debug;

use crate::domain::commands::{
    CreateTransactionCommand, TransactionListQuery, TransactionPage, UpdateTransactionCommand,
};
use crate::domain::models::{Transaction, TransactionSummary};
use crate::service::mappers;
use crate::service::traits::TransactionGateway;

const GET_TRANSACTION: &str = "query Transaction($id: ID!) {
  transaction(id: $id) { _id alias date desc type value user }
}";

const GET_TRANSACTIONS: &str = "query Transactions($limit: Int, $page: Int) {
  transactions(limit: $limit, page: $page) {
    hasMore
    items { _id alias date desc type value user }
    page
    total
    totalInPage
    totalPages
  }
}";

const GET_TRANSACTION_SUMMARY: &str = "query GetTransactionSummary {
  getTransactionSummary {
    balance
    breakdown { deposit payment transfer withdrawal }
  }
}";

const CREATE_TRANSACTION: &str = "mutation CreateTransaction($input: TransactionInput!) {
  createTransaction(input: $input) { _id alias date desc type value user }
}";

const UPDATE_TRANSACTION: &str =
    "mutation UpdateTransaction($id: ID!, $input: TransactionUpdateInput!) {
  updateTransaction(id: $id, input: $input) { _id alias date desc type value user }
}";

const DELETE_TRANSACTION: &str = "mutation DeleteTransaction($id: ID!) {
  deleteTransaction(id: $id)
}";

pub struct GraphQlTransactionGateway {
    http: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl GraphQlTransactionGateway {
    pub fn new(endpoint: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            auth_token,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: serde_json::Value,
    ) -> Result<T> {
        debug!(endpoint = %self.endpoint, "sending GraphQL request");
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .context("transaction service is unreachable")?
            .error_for_status()
            .context("transaction service returned an HTTP error")?;
        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .context("transaction service returned a malformed response")?;
        unwrap_data(envelope)
    }
}

/// Unwrap a GraphQL envelope, turning the `errors` array into one error.
fn unwrap_data<T>(envelope: GraphQlResponse<T>) -> Result<T> {
    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(anyhow!("transaction service error: {}", messages.join("; ")));
    }
    envelope
        .data
        .ok_or_else(|| anyhow!("transaction service returned neither data nor errors"))
}

#[derive(Deserialize)]
struct TransactionsData {
    transactions: PaginatedTransactionsDto,
}

#[derive(Deserialize)]
struct TransactionData {
    transaction: Option<TransactionDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    create_transaction: TransactionDto,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_transaction: TransactionDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteData {
    delete_transaction: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryData {
    get_transaction_summary: TransactionSummaryDto,
}

#[async_trait]
impl TransactionGateway for GraphQlTransactionGateway {
    async fn list(&self, query: TransactionListQuery) -> Result<TransactionPage> {
        let data: TransactionsData = self
            .execute(
                GET_TRANSACTIONS,
                json!({ "limit": query.limit, "page": query.page }),
            )
            .await?;
        Ok(mappers::page_from_wire(data.transactions))
    }

    async fn get(&self, id: &str) -> Result<Option<Transaction>> {
        let data: TransactionData = self.execute(GET_TRANSACTION, json!({ "id": id })).await?;
        Ok(data.transaction.map(mappers::transaction_from_wire))
    }

    async fn create(&self, cmd: CreateTransactionCommand) -> Result<Transaction> {
        let input = mappers::create_to_wire(cmd);
        let data: CreateData = self
            .execute(CREATE_TRANSACTION, json!({ "input": input }))
            .await?;
        Ok(mappers::transaction_from_wire(data.create_transaction))
    }

    async fn update(&self, id: &str, cmd: UpdateTransactionCommand) -> Result<Transaction> {
        let input = mappers::update_to_wire(cmd);
        let data: UpdateData = self
            .execute(UPDATE_TRANSACTION, json!({ "id": id, "input": input }))
            .await?;
        Ok(mappers::transaction_from_wire(data.update_transaction))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let data: DeleteData = self.execute(DELETE_TRANSACTION, json!({ "id": id })).await?;
        Ok(data.delete_transaction)
    }

    async fn summary(&self) -> Result<TransactionSummary> {
        let data: SummaryData = self
            .execute(GET_TRANSACTION_SUMMARY, json!({}))
            .await?;
        Ok(mappers::summary_from_wire(data.get_transaction_summary))
    }
}
