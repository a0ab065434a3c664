//! Domain-level command and query types for transaction operations.
//!
//! These structs are what the engines and screen controller work with; the
//! gateway layer maps them to the wire DTOs in the `shared` crate. Create and
//! update are distinct, fully-typed commands rather than an open map, so a
//! misspelled or omitted field is a compile error instead of a silent no-op.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::models::{Transaction, TransactionKind};

/// Default number of transactions fetched per page.
pub const PAGE_SIZE: u32 = 10;

/// Input for creating a new transaction.
///
/// Flow direction is intentionally absent: it is derived from `kind` and a
/// caller must not be able to set the two inconsistently.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTransactionCommand {
    pub alias: Option<String>,
    /// Calendar date in `DD/MM/YYYY` form.
    pub date: String,
    pub kind: TransactionKind,
    /// Non-negative magnitude.
    pub value: f64,
}

/// Input for updating an existing transaction. Absent fields are left
/// untouched by the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTransactionCommand {
    /// `Some("")` travels on the wire and clears the stored alias; `None`
    /// omits the field and keeps whatever is there.
    pub alias: Option<String>,
    pub date: Option<String>,
    pub kind: Option<TransactionKind>,
    pub value: Option<f64>,
}

/// Query parameters for one page of the transaction list.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionListQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
}

impl Default for TransactionListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
        }
    }
}

/// One fetched page of transactions, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    /// 1-based page number this result covers.
    pub page: u32,
    /// Whether a further page exists upstream. Trusted as the server
    /// declares it, not re-derived from `total`.
    pub has_more: bool,
    pub total: u32,
}

/// Validation failures caught before any network call is made.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("date must be a valid DD/MM/YYYY calendar date, got {0:?}")]
    InvalidDate(String),
    #[error("value must be a non-negative amount, got {0}")]
    NegativeValue(f64),
    #[error("value must be a finite number")]
    NonFiniteValue,
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(date, "%d/%m/%Y")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

fn validate_value(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue);
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue(value));
    }
    Ok(())
}

fn normalize_alias(alias: Option<String>) -> Option<String> {
    alias
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

impl CreateTransactionCommand {
    /// Validate fields and normalize the alias (trimmed, empty becomes None).
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        validate_date(&self.date)?;
        validate_value(self.value)?;
        self.alias = normalize_alias(self.alias);
        Ok(self)
    }
}

impl UpdateTransactionCommand {
    /// Validate whichever fields are present. The alias is trimmed but an
    /// emptied one is kept, so clearing it reaches the server.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        if let Some(date) = &self.date {
            validate_date(date)?;
        }
        if let Some(value) = self.value {
            validate_value(value)?;
        }
        self.alias = self.alias.map(|a| a.trim().to_string());
        Ok(self)
    }
}
