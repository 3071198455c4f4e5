//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction, TransactionUpdate},
};

/// Handles the creation, retrieval, modification and deletion of transactions.
///
/// Implementers assign the ID and the `created_at`/`updated_at` timestamps.
/// An ID that was not issued by the store matches no transaction.
pub trait TransactionStore {
    /// Retrieve every transaction, sorted by date from newest to oldest.
    ///
    /// Transactions on the same date are ordered from most to least recently created.
    fn list(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to a stored transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Create a new transaction in the store.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Apply `update` to a stored transaction and refresh its update time.
    ///
    /// # Errors
    /// Returns an [Error::UpdateMissingTransaction] if `id` does not refer to a
    /// stored transaction.
    fn update(&mut self, id: TransactionId, update: TransactionUpdate)
    -> Result<Transaction, Error>;

    /// Remove a transaction from the store and return its ID.
    ///
    /// # Errors
    /// Returns an [Error::DeleteMissingTransaction] if `id` does not refer to a
    /// stored transaction.
    fn delete(&mut self, id: TransactionId) -> Result<TransactionId, Error>;
}
