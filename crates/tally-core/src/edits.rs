//! Table edit batches
//!
//! A batch records what the user changed in the table: cell edits and
//! deleted rows, both keyed by row position in the view they were looking
//! at. Positions mean nothing to the store, so a batch is resolved against
//! that same view into stored ids before anything is written.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Column, Transaction, TransactionEdit};

/// Position-keyed change set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBatch {
    pub edited_rows: BTreeMap<usize, Vec<TransactionEdit>>,
    pub deleted_rows: Vec<usize>,
}

/// On-disk shape: `{"edited_rows": {"0": {"amount": "12.50"}}, "deleted_rows": [3]}`
#[derive(Debug, Deserialize)]
struct RawBatch {
    #[serde(default)]
    edited_rows: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    deleted_rows: Vec<usize>,
}

/// Id-keyed change set, ready for the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBatch {
    pub updates: Vec<(i64, TransactionEdit)>,
    pub deletions: Vec<i64>,
}

impl ResolvedBatch {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deletions.is_empty()
    }
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cell edit for the row at `position`
    pub fn edit(mut self, position: usize, edit: TransactionEdit) -> Self {
        self.edited_rows.entry(position).or_default().push(edit);
        self
    }

    /// Mark the row at `position` for deletion
    pub fn delete(mut self, position: usize) -> Self {
        if !self.deleted_rows.contains(&position) {
            self.deleted_rows.push(position);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.edited_rows.values().all(|e| e.is_empty()) && self.deleted_rows.is_empty()
    }

    /// Parse a change set exported by a table editor
    ///
    /// Cell values may be JSON strings, numbers or null (null clears a note).
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawBatch = serde_json::from_str(json)?;

        let mut batch = Self::new();
        for (position, cells) in raw.edited_rows {
            let position: usize = position.trim().parse().map_err(|_| {
                Error::InvalidData(format!("Row position must be a number, got '{}'", position))
            })?;
            for (column, value) in cells {
                let column: Column = column.parse().map_err(Error::InvalidData)?;
                let text = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Null => String::new(),
                    other => {
                        return Err(Error::InvalidData(format!(
                            "Unsupported value for {}: {}",
                            column, other
                        )))
                    }
                };
                batch = batch.edit(position, TransactionEdit::parse(column, &text)?);
            }
        }
        for position in raw.deleted_rows {
            batch = batch.delete(position);
        }

        Ok(batch)
    }

    /// Map row positions onto the ids of `view`
    ///
    /// Fails without partial output if any position is out of range.
    pub fn resolve(&self, view: &[Transaction]) -> Result<ResolvedBatch> {
        let id_at = |position: usize| {
            view.get(position).map(|tx| tx.id).ok_or_else(|| {
                Error::InvalidData(format!(
                    "Row {} is out of range (the view has {} rows)",
                    position,
                    view.len()
                ))
            })
        };

        let mut resolved = ResolvedBatch::default();
        for (position, edits) in &self.edited_rows {
            let id = id_at(*position)?;
            resolved
                .updates
                .extend(edits.iter().cloned().map(|edit| (id, edit)));
        }
        for position in &self.deleted_rows {
            resolved.deletions.push(id_at(*position)?);
        }

        Ok(resolved)
    }
}
