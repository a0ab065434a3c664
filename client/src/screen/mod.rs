pub mod transactions;

pub use transactions::{TransactionForm, TransactionsScreen, UiEvent};
