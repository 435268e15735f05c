//! Transaction operations

use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::Database;
use crate::edits::ResolvedBatch;
use crate::error::{Error, Result};
use crate::models::{
    check_amount_width, validate_amount, NewTransaction, Transaction, TransactionEdit,
    TransactionKind,
};

const SELECT_COLUMNS: &str = "SELECT id, date, kind, category, amount, note FROM transactions";

/// What an edit batch changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub updated: usize,
    pub deleted: usize,
}

impl Database {
    /// Insert a transaction, returning its new id
    ///
    /// Rejects amounts that round to zero or below, or overflow the amount
    /// column, before touching the database.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let amount = validate_amount(tx.amount)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO transactions (date, kind, category, amount, note) VALUES (?, ?, ?, ?, ?)",
            params![
                tx.date.to_string(),
                tx.kind.as_str(),
                tx.category,
                amount.to_string(),
                tx.note,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, kind = %tx.kind, "Inserted transaction");
        Ok(id)
    }

    /// Apply a single column edit
    pub fn update_transaction(&self, id: i64, edit: &TransactionEdit) -> Result<()> {
        let conn = self.conn()?;
        update_row(&conn, id, edit)
    }

    /// Delete a single transaction
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        delete_row(&conn, id)
    }

    /// Delete every transaction and restart ids at 1
    ///
    /// Returns the number of rows removed.
    pub fn delete_all_transactions(&self) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let removed = tx.execute("DELETE FROM transactions", [])?;
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'transactions'", [])?;
        tx.commit()?;

        info!(removed, "All transactions deleted");
        Ok(removed)
    }

    /// All transactions, newest first
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY date DESC, id DESC", SELECT_COLUMNS))?;

        let transactions = stmt
            .query_map([], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = transactions.len(), "Loaded transactions");
        Ok(transactions)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let transaction = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                params![id],
                Self::row_to_transaction,
            )
            .optional()?;

        Ok(transaction)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Apply edits then deletions in one SQLite transaction
    ///
    /// If any step fails (for example an id that no longer exists) the
    /// whole batch is rolled back.
    pub fn apply_batch(&self, batch: &ResolvedBatch) -> Result<BatchOutcome> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        for (id, edit) in &batch.updates {
            update_row(&tx, *id, edit)?;
        }
        for id in &batch.deletions {
            delete_row(&tx, *id)?;
        }
        tx.commit()?;

        let outcome = BatchOutcome {
            updated: batch.updates.len(),
            deleted: batch.deletions.len(),
        };
        info!(
            updated = outcome.updated,
            deleted = outcome.deleted,
            "Applied edit batch"
        );
        Ok(outcome)
    }

    /// Helper to convert a row to Transaction
    /// Column order: id, date, kind, category, amount, note
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(1)?;
        let kind_str: String = row.get(2)?;
        let amount_str: String = row.get(4)?;

        Ok(Transaction {
            id: row.get(0)?,
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| conversion_error(1, e))?,
            kind: TransactionKind::from_str(&kind_str).map_err(|e| conversion_error(2, e))?,
            category: row.get(3)?,
            amount: Decimal::from_str(&amount_str).map_err(|e| conversion_error(4, e))?,
            note: row.get(5)?,
        })
    }
}

fn conversion_error(
    idx: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}

/// Column names come from a closed set of statements, never from input
fn update_row(conn: &Connection, id: i64, edit: &TransactionEdit) -> Result<()> {
    let (sql, value): (&str, Option<String>) = match edit {
        TransactionEdit::Date(d) => (
            "UPDATE transactions SET date = ? WHERE id = ?",
            Some(d.to_string()),
        ),
        TransactionEdit::Kind(k) => (
            "UPDATE transactions SET kind = ? WHERE id = ?",
            Some(k.as_str().to_string()),
        ),
        TransactionEdit::Category(c) => (
            "UPDATE transactions SET category = ? WHERE id = ?",
            Some(c.clone()),
        ),
        TransactionEdit::Amount(a) => (
            "UPDATE transactions SET amount = ? WHERE id = ?",
            Some(check_amount_width(*a)?.to_string()),
        ),
        TransactionEdit::Note(n) => ("UPDATE transactions SET note = ? WHERE id = ?", n.clone()),
    };

    let changed = conn.execute(sql, params![value, id])?;
    if changed == 0 {
        return Err(Error::NotFound(format!("Transaction {}", id)));
    }

    debug!(id, column = %edit.column(), "Updated transaction");
    Ok(())
}

fn delete_row(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
    if changed == 0 {
        return Err(Error::NotFound(format!("Transaction {}", id)));
    }

    debug!(id, "Deleted transaction");
    Ok(())
}
