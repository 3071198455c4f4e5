//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, `NewTransaction` and `TransactionUpdate` for describing changes
//! - The request bodies clients send and their validation
//! - Route handlers for listing, creating, updating and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod list_endpoint;

pub use core::{
    NewTransaction, Transaction, TransactionType, TransactionUpdate, parse_date, validate_amount,
};
pub use create_endpoint::{create_transaction, create_transaction_endpoint};
pub use delete_endpoint::{delete_transaction, delete_transaction_endpoint};
pub use edit_endpoint::{edit_transaction_endpoint, update_transaction};
pub use form::{
    AmountInput, DeleteTransactionForm, RequestedId, TransactionForm, UpdateTransactionForm,
    require_id,
};
pub use list_endpoint::{get_transaction_endpoint, get_transactions_endpoint};
