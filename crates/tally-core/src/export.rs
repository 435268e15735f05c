//! Export of the filtered transaction view
//!
//! Supports:
//! - CSV with a header row and one line per transaction
//! - Pretty-printed JSON array

use std::io::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {}. Available: csv, json", s)),
        }
    }
}

/// One exported row; field order is the CSV column order
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: String,
    kind: &'static str,
    category: &'a str,
    amount: String,
    note: &'a str,
}

impl<'a> From<&'a Transaction> for ExportRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            id: tx.id,
            date: tx.date.to_string(),
            kind: tx.kind.as_str(),
            category: &tx.category,
            amount: tx.amount.to_string(),
            note: tx.note.as_deref().unwrap_or(""),
        }
    }
}

/// Write transactions as CSV (header row first, even when empty)
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(["id", "date", "kind", "category", "amount", "note"])?;
    for tx in transactions {
        wtr.serialize(ExportRow::from(tx))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write transactions as a JSON array
pub fn write_json<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, transactions)?;
    Ok(())
}

/// Render transactions in the given format
pub fn export_transactions(transactions: &[Transaction], format: ExportFormat) -> Result<String> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Csv => write_csv(transactions, &mut buf)?,
        ExportFormat::Json => write_json(transactions, &mut buf)?,
    }

    tracing::debug!(
        rows = transactions.len(),
        format = format.extension(),
        "Exported transactions"
    );
    String::from_utf8(buf).map_err(|e| Error::InvalidData(format!("Export is not UTF-8: {}", e)))
}
