//! Bytebank client core.
//!
//! The state and coordination layer of the Bytebank personal-finance app:
//! a date-ordered, paginated transaction list that reconciles single-item
//! writes without refetching, and a receipt-upload workflow that defers the
//! file transfer until the owning transaction exists. All durable state
//! lives in the external transaction service and receipt storage; this crate
//! holds only transient view state.

pub mod config;
pub mod domain;
pub mod engine;
pub mod screen;
pub mod service;
