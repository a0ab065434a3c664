//! Domain model for a transaction.

use serde::{Deserialize, Serialize};

/// What a transaction is: the closed set of description kinds the app knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Payment,
    Transfer,
    Withdrawal,
}

/// Direction of money movement relative to the user's account.
///
/// Always derived from [`TransactionKind`]; never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    Inflow,
    Outflow,
}

impl TransactionKind {
    /// Total mapping from kind to flow direction. Deposits bring money in,
    /// everything else takes it out.
    pub fn flow(self) -> FlowDirection {
        match self {
            TransactionKind::Deposit => FlowDirection::Inflow,
            TransactionKind::Payment => FlowDirection::Outflow,
            TransactionKind::Transfer => FlowDirection::Outflow,
            TransactionKind::Withdrawal => FlowDirection::Outflow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Payment => "Payment",
            TransactionKind::Transfer => "Transfer",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque identifier assigned by the server on creation.
    pub id: String,
    /// Optional short user-supplied label.
    pub alias: Option<String>,
    /// Calendar date in `DD/MM/YYYY` form; no time component, no timezone.
    pub date: String,
    pub kind: TransactionKind,
    /// Invariant: always equals `kind.flow()`. Re-derived at the gateway
    /// boundary, so wire data can never put the model in disagreement.
    pub flow: FlowDirection,
    /// Non-negative magnitude; the sign lives in `flow`.
    pub value: f64,
}

impl Transaction {
    /// Signed value for display and arithmetic: inflows positive, outflows
    /// negative.
    pub fn signed_value(&self) -> f64 {
        match self.flow {
            FlowDirection::Inflow => self.value,
            FlowDirection::Outflow => -self.value,
        }
    }
}

/// Balance plus per-kind totals, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub balance: f64,
    pub breakdown: KindBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindBreakdown {
    pub deposit: f64,
    pub payment: f64,
    pub transfer: f64,
    pub withdrawal: f64,
}
