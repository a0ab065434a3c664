//! The two stateful cores: the paginated list view and the deferred
//! receipt-upload workflow.

pub mod list;
pub mod receipt;

pub use list::{PagedTransactionList, TransactionListEngine};
pub use receipt::{ReceiptCoordinator, ReceiptError, ReceiptPolicy, ReceiptState};
