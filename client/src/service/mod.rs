//! External service gateways: trait seams plus concrete HTTP transports.

pub mod graphql;
pub mod mappers;
pub mod storage;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use graphql::GraphQlTransactionGateway;
pub use storage::HttpReceiptStore;
pub use traits::{ReceiptStore, TransactionGateway};
