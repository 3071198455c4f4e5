//! Contains the trait and implementations for objects that store [transactions](crate::transaction::Transaction).

mod memory;
mod transaction;

pub mod sqlite;

pub use memory::InMemoryTransactionStore;
pub use sqlite::SQLiteTransactionStore;
pub use transaction::TransactionStore;
