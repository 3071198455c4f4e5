//! Implements a transaction store that keeps everything in memory.
//!
//! Nothing is persisted: the transactions are lost when the process exits.
//! IDs issued by this store carry the in-memory prefix, e.g. "mem_1".

use std::sync::{Arc, Mutex, MutexGuard};

use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{NewTransaction, Transaction, TransactionUpdate},
};

#[derive(Debug, Default)]
struct Inner {
    /// Transactions in the order they were created.
    transactions: Vec<Transaction>,
    last_id: u64,
}

impl Inner {
    fn position(&self, id: TransactionId) -> Option<usize> {
        self.transactions
            .iter()
            .position(|transaction| transaction.id == id)
    }
}

/// Stores transactions in a [Vec] shared between clones of the store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, Error> {
        self.inner.lock().map_err(|error| {
            tracing::error!("Could not acquire in-memory store lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        let mut transactions: Vec<Transaction> =
            self.lock()?.transactions.iter().rev().cloned().collect();
        // Stable sort, so same-day transactions stay newest first.
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(transactions)
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let inner = self.lock()?;

        inner
            .position(id)
            .map(|index| inner.transactions[index].clone())
            .ok_or(Error::NotFound)
    }

    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let mut inner = self.lock()?;
        inner.last_id += 1;

        let transaction =
            transaction.finalise(TransactionId::InMemory(inner.last_id), OffsetDateTime::now_utc());
        inner.transactions.push(transaction.clone());
        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    fn update(
        &mut self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let mut inner = self.lock()?;
        let index = inner.position(id).ok_or(Error::UpdateMissingTransaction)?;

        let updated = update.apply(inner.transactions[index].clone(), OffsetDateTime::now_utc());
        inner.transactions[index] = updated.clone();
        tracing::debug!("Updated transaction {id}");

        Ok(updated)
    }

    fn delete(&mut self, id: TransactionId) -> Result<TransactionId, Error> {
        let mut inner = self.lock()?;
        let index = inner.position(id).ok_or(Error::DeleteMissingTransaction)?;

        inner.transactions.remove(index);
        tracing::debug!("Deleted transaction {id}");

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        category::CategoryId,
        database_id::TransactionId,
        stores::{InMemoryTransactionStore, TransactionStore},
        transaction::{NewTransaction, TransactionType, TransactionUpdate},
    };

    fn income(amount: f64, date: time::Date) -> NewTransaction {
        NewTransaction::new(amount, date, "Pay", TransactionType::Income).unwrap()
    }

    #[test]
    fn create_assigns_prefixed_ids() {
        let mut store = InMemoryTransactionStore::new();

        let first = store.create(income(1.0, date!(2024 - 01 - 01))).unwrap();
        let second = store.create(income(2.0, date!(2024 - 01 - 02))).unwrap();

        assert_eq!(first.id, TransactionId::InMemory(1));
        assert_eq!(second.id.to_string(), "mem_2");
    }

    #[test]
    fn clones_share_transactions() {
        let mut store = InMemoryTransactionStore::new();
        let clone = store.clone();

        let transaction = store.create(income(1.0, date!(2024 - 01 - 01))).unwrap();

        assert_eq!(clone.get(transaction.id), Ok(transaction));
    }

    #[test]
    fn list_sorts_by_descending_date_then_newest() {
        let mut store = InMemoryTransactionStore::new();
        let january = store.create(income(1.0, date!(2024 - 01 - 10))).unwrap();
        let march = store.create(income(2.0, date!(2024 - 03 - 10))).unwrap();
        let january_later = store.create(income(3.0, date!(2024 - 01 - 10))).unwrap();

        let got = store.list().unwrap();

        assert_eq!(got, vec![march, january_later, january]);
    }

    #[test]
    fn update_replaces_fields_and_keeps_creation_time() {
        let mut store = InMemoryTransactionStore::new();
        let transaction = store.create(income(10.0, date!(2024 - 01 - 01))).unwrap();

        let updated = store
            .update(
                transaction.id,
                TransactionUpdate::default()
                    .category(CategoryId::new("salary"))
                    .transaction_type(TransactionType::Income),
            )
            .unwrap();

        assert_eq!(updated.category, CategoryId::new("salary"));
        assert_eq!(updated.created_at, transaction.created_at);
        assert_eq!(store.get(transaction.id), Ok(updated));
    }

    #[test]
    fn update_fails_on_missing_transaction() {
        let mut store = InMemoryTransactionStore::new();

        assert_eq!(
            store.update(TransactionId::InMemory(9), TransactionUpdate::default()),
            Err(Error::UpdateMissingTransaction)
        );
        assert_eq!(
            store.update(TransactionId::Database(1), TransactionUpdate::default()),
            Err(Error::UpdateMissingTransaction)
        );
    }

    #[test]
    fn delete_twice_fails() {
        let mut store = InMemoryTransactionStore::new();
        let transaction = store.create(income(10.0, date!(2024 - 01 - 01))).unwrap();

        assert_eq!(store.delete(transaction.id), Ok(transaction.id));
        assert_eq!(store.list(), Ok(vec![]));
        assert_eq!(
            store.delete(transaction.id),
            Err(Error::DeleteMissingTransaction)
        );
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = InMemoryTransactionStore::new();
        let first = store.create(income(1.0, date!(2024 - 01 - 01))).unwrap();
        store.delete(first.id).unwrap();

        let second = store.create(income(1.0, date!(2024 - 01 - 01))).unwrap();

        assert_ne!(first.id, second.id);
    }
}
