pub mod transaction;

pub use transaction::{
    FlowDirection, KindBreakdown, Transaction, TransactionKind, TransactionSummary,
};
