//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{
    Connection, Row, ToSql, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use time::OffsetDateTime;

use crate::{
    Error,
    category::CategoryId,
    database_id::{DatabaseId, TransactionId},
    db::{CreateTable, MapRow},
    stores::TransactionStore,
    transaction::{NewTransaction, Transaction, TransactionType, TransactionUpdate},
};

const SELECT_COLUMNS: &str =
    "id, amount, date, description, type, category, created_at, updated_at";

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The `transaction` table must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

fn select_by_id(id: DatabaseId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], SQLiteTransactionStore::map_row)?;

    Ok(transaction)
}

impl TransactionStore for SQLiteTransactionStore {
    /// Retrieve all transactions in the database, newest first.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM \"transaction\" ORDER BY date DESC, id DESC"
            ))?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let TransactionId::Database(id) = id else {
            return Err(Error::NotFound);
        };

        let connection = self.lock()?;
        select_by_id(id, &connection)
    }

    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let now = OffsetDateTime::now_utc();
        // The row ID is unknown until the insert, so a placeholder is used for binding the values.
        let transaction = transaction.finalise(TransactionId::Database(0), now);
        let connection = self.lock()?;

        let transaction = connection
            .prepare(&format!(
                "INSERT INTO \"transaction\" (amount, date, description, type, category, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {SELECT_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.amount,
                    transaction.date,
                    transaction.description,
                    transaction.transaction_type,
                    transaction.category.as_ref().map(CategoryId::as_str),
                    transaction.created_at,
                    transaction.updated_at,
                ],
                Self::map_row,
            )?;

        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Update a transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update(
        &mut self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let TransactionId::Database(row_id) = id else {
            return Err(Error::UpdateMissingTransaction);
        };

        let connection = self.lock()?;
        let sql_transaction = connection.unchecked_transaction()?;

        let existing = match select_by_id(row_id, &sql_transaction) {
            Err(Error::NotFound) => return Err(Error::UpdateMissingTransaction),
            result => result?,
        };
        let updated = update.apply(existing, OffsetDateTime::now_utc());

        let rows_affected = sql_transaction.execute(
            "UPDATE \"transaction\"
            SET \
                amount = ?1, \
                date = ?2, \
                description = ?3, \
                type = ?4, \
                category = ?5, \
                updated_at = ?6 \
            WHERE id = ?7;",
            params![
                updated.amount,
                updated.date,
                updated.description,
                updated.transaction_type,
                updated.category.as_ref().map(CategoryId::as_str),
                updated.updated_at,
                row_id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingTransaction);
        }

        let updated = select_by_id(row_id, &sql_transaction)?;
        sql_transaction.commit()?;
        tracing::debug!("Updated transaction {id}");

        Ok(updated)
    }

    /// Delete a transaction from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete(&mut self, id: TransactionId) -> Result<TransactionId, Error> {
        let TransactionId::Database(row_id) = id else {
            return Err(Error::DeleteMissingTransaction);
        };

        let rows_affected = self.lock()?.execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &row_id)],
        )?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingTransaction);
        }

        tracing::debug!("Deleted transaction {id}");

        Ok(id)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('expense', 'income')),
                category TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let date = row.get(offset + 2)?;
        let description = row.get(offset + 3)?;
        let transaction_type = row.get(offset + 4)?;
        let category: Option<String> = row.get(offset + 5)?;
        let created_at = row.get(offset + 6)?;
        let updated_at = row.get(offset + 7)?;

        Ok(Transaction {
            id: TransactionId::Database(id),
            amount,
            date,
            description,
            transaction_type,
            category: category.as_deref().and_then(CategoryId::new),
            created_at,
            updated_at,
        })
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        category::CategoryId,
        database_id::TransactionId,
        db::initialize,
        stores::TransactionStore,
        transaction::{NewTransaction, TransactionType, TransactionUpdate},
    };

    use super::SQLiteTransactionStore;

    fn get_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    fn expense(amount: f64, date: time::Date, description: &str) -> NewTransaction {
        NewTransaction::new(amount, date, description, TransactionType::Expense)
            .expect("Could not build transaction")
    }

    #[test]
    fn create_succeeds() {
        let mut store = get_store();

        let transaction = store
            .create(expense(100.5, date!(2024 - 01 - 15), "Test"))
            .expect("Could not create transaction");

        assert_eq!(transaction.id, TransactionId::Database(1));
        assert_eq!(transaction.amount, 100.5);
        assert_eq!(transaction.date, date!(2024 - 01 - 15));
        assert_eq!(transaction.description, "Test");
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.category, None);
        assert_eq!(transaction.created_at, transaction.updated_at);
    }

    #[test]
    fn create_keeps_unknown_category() {
        let mut store = get_store();
        let category = CategoryId::new("not-a-category");

        let transaction = store
            .create(expense(1.0, date!(2024 - 01 - 15), "Test").category(category.clone()))
            .unwrap();

        assert_eq!(transaction.category, category);
    }

    #[test]
    fn get_transaction_by_id_succeeds() {
        let mut store = get_store();
        let transaction = store
            .create(expense(12.3, date!(2024 - 02 - 01), "Lunch"))
            .unwrap();

        let selected_transaction = store.get(transaction.id);

        assert_eq!(Ok(transaction), selected_transaction);
    }

    #[test]
    fn get_transaction_fails_on_invalid_id() {
        let mut store = get_store();
        let transaction = store
            .create(expense(123.0, date!(2024 - 02 - 01), "Lunch"))
            .unwrap();
        let TransactionId::Database(row_id) = transaction.id else {
            panic!("SQLite store returned a non-database ID");
        };

        assert_eq!(
            store.get(TransactionId::Database(row_id + 654)),
            Err(Error::NotFound)
        );
        assert_eq!(store.get(TransactionId::InMemory(1)), Err(Error::NotFound));
    }

    #[test]
    fn list_sorts_by_descending_date() {
        let mut store = get_store();
        let oldest = store
            .create(expense(1.0, date!(2024 - 01 - 01), "oldest"))
            .unwrap();
        let newest = store
            .create(expense(2.0, date!(2024 - 03 - 01), "newest"))
            .unwrap();
        let middle = store
            .create(expense(3.0, date!(2024 - 02 - 01), "middle"))
            .unwrap();

        let got = store.list().unwrap();

        assert_eq!(got, vec![newest, middle, oldest]);
    }

    #[test]
    fn list_puts_latest_created_first_on_same_date() {
        let mut store = get_store();
        let first = store
            .create(expense(1.0, date!(2024 - 01 - 01), "first"))
            .unwrap();
        let second = store
            .create(expense(2.0, date!(2024 - 01 - 01), "second"))
            .unwrap();

        assert_eq!(store.list().unwrap(), vec![second, first]);
    }

    #[test]
    fn update_changes_given_fields_only() {
        let mut store = get_store();
        let transaction = store
            .create(expense(100.5, date!(2024 - 01 - 15), "Test"))
            .unwrap();

        let update = TransactionUpdate::default()
            .amount(150.0)
            .unwrap()
            .description("Updated")
            .unwrap();
        let updated = store.update(transaction.id, update).unwrap();

        assert_eq!(updated.amount, 150.0);
        assert_eq!(updated.description, "Updated");
        assert_eq!(updated.date, transaction.date);
        assert_eq!(updated.transaction_type, transaction.transaction_type);
        assert_eq!(updated.created_at, transaction.created_at);
        assert!(updated.updated_at >= transaction.updated_at);
        assert_eq!(store.get(transaction.id), Ok(updated));
    }

    #[test]
    fn update_fails_on_missing_transaction() {
        let mut store = get_store();

        let result = store.update(TransactionId::Database(42), TransactionUpdate::default());

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_removes_transaction() {
        let mut store = get_store();
        let transaction = store
            .create(expense(1.23, date!(2025 - 10 - 26), "Test"))
            .unwrap();

        let deleted_id = store.delete(transaction.id).unwrap();

        assert_eq!(deleted_id, transaction.id);
        assert_eq!(store.get(transaction.id), Err(Error::NotFound));
        assert_eq!(
            store.delete(transaction.id),
            Err(Error::DeleteMissingTransaction)
        );
    }

    #[test]
    fn delete_fails_on_in_memory_id() {
        let mut store = get_store();

        assert_eq!(
            store.delete(TransactionId::InMemory(1)),
            Err(Error::DeleteMissingTransaction)
        );
    }
}
