//! Wire types for the Bytebank GraphQL API.
//!
//! These structs mirror the schema field-for-field (including the `_id`
//! naming and camelCase pagination fields) and carry no business rules.
//! The client crate maps them to and from its domain models at the gateway
//! boundary.

use serde::{Deserialize, Serialize};

/// Transaction description kind as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionDescDto {
    Deposit,
    Payment,
    Transfer,
    Withdrawal,
}

/// Flow direction as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionTypeDto {
    Inflow,
    Outflow,
}

/// A transaction record as returned by the API.
///
/// `value` is whatever the server stored; some deployments return signed
/// values, others magnitudes. Normalization happens in the client mappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub alias: Option<String>,
    /// Calendar date in `DD/MM/YYYY` form, no time component.
    pub date: String,
    pub desc: TransactionDescDto,
    #[serde(rename = "type")]
    pub flow: TransactionTypeDto,
    pub value: f64,
    /// Owning user id; populated on reads, optional on writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// One page of the `transactions(limit, page)` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedTransactionsDto {
    pub has_more: bool,
    pub items: Vec<TransactionDto>,
    /// 1-based page number this response covers.
    pub page: u32,
    pub total: u32,
    pub total_in_page: u32,
    pub total_pages: u32,
}

/// Input payload for `createTransaction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInputDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub date: String,
    pub desc: TransactionDescDto,
    #[serde(rename = "type")]
    pub flow: TransactionTypeDto,
    pub value: f64,
}

/// Input payload for `updateTransaction`.
///
/// Every field is explicitly optional and omitted from the document when
/// absent, so a partial update never clobbers fields the caller did not set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdateInputDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<TransactionDescDto>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub flow: Option<TransactionTypeDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Per-kind totals from `getTransactionSummary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryBreakdownDto {
    pub deposit: f64,
    pub payment: f64,
    pub transfer: f64,
    pub withdrawal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummaryDto {
    pub balance: f64,
    pub breakdown: SummaryBreakdownDto,
}

/// A GraphQL request document with its variables.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Standard GraphQL response envelope: either `data` or `errors` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}
