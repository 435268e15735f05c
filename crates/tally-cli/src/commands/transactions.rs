//! Transaction command implementations

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::categories::{self, categories_for, resolve_any_category};
use tally_core::models::validate_amount;
use tally_core::{
    BatchOutcome, Column, Database, EditBatch, EntryVisibility, MoneyFormat, NewTransaction,
    Transaction, TransactionEdit, TransactionKind,
};

use super::{truncate, ViewOptions};

pub fn cmd_add(
    db: &Database,
    view: &ViewOptions,
    kind: TransactionKind,
    amount: Decimal,
    category: Option<&str>,
    date: Option<NaiveDate>,
    note: Option<&str>,
) -> Result<()> {
    // Checked after rounding to cents
    let amount = match validate_amount(amount) {
        Ok(a) => a,
        Err(e) => {
            println!("⚠️  {}. Nothing was saved.", e);
            return Ok(());
        }
    };

    let category = match category {
        Some(input) => match categories::resolve_category(kind, input) {
            Ok(c) => c,
            Err(e) => {
                println!("⚠️  {}", e);
                return Ok(());
            }
        },
        None => categories::default_category(kind),
    };

    let mut tx = NewTransaction::new(date.unwrap_or(view.today), kind, category, amount);
    if let Some(note) = note {
        tx = tx.with_note(note);
    }

    let id = db
        .insert_transaction(&tx)
        .context("Failed to save transaction")?;

    let visibility = EntryVisibility::check(view.filter, view.today, tx.date);
    let icon = match visibility {
        EntryVisibility::Visible => "✅",
        EntryVisibility::Hidden(_) => "⚠️ ",
    };
    println!("{} {} (#{})", icon, visibility.message(), id);
    println!(
        "   {} │ {} │ {} │ {}",
        tx.date,
        kind.label(),
        category,
        view.money_cents().format(tx.amount)
    );

    Ok(())
}

pub fn cmd_categories(kind: Option<TransactionKind>) -> Result<()> {
    let kinds: Vec<TransactionKind> = match kind {
        Some(k) => vec![k],
        None => TransactionKind::all().to_vec(),
    };

    for kind in kinds {
        println!();
        println!("🏷️  {} ({})", kind.label(), kind.as_str());
        println!("   ─────────────────────────────");
        for category in categories_for(kind) {
            println!("   {}", category);
        }
    }

    Ok(())
}

pub fn cmd_list(db: &Database, view: &ViewOptions) -> Result<()> {
    let transactions = view.visible(db)?;

    if transactions.is_empty() {
        println!("No transactions in filter '{}'. Record one with:", view.filter.label());
        println!("  tally add expense --amount 12.50 --category Food");
        return Ok(());
    }

    println!();
    println!(
        "📝 Transactions - {} ({})",
        view.filter.label(),
        transactions.len()
    );
    println!("   ─────────────────────────────────────────────────────────────────────────");
    println!("   {}", table_header());

    let money = view.money_cents();
    for (row, tx) in transactions.iter().enumerate() {
        println!("   {}", format_row(row, tx, &money));
    }

    Ok(())
}

pub(crate) fn table_header() -> String {
    format!(
        "{:>4} │ {:>5} │ {:10} │ {:16} │ {:20} │ {:>12} │ Note",
        "Row", "Id", "Date", "Kind", "Category", "Amount"
    )
}

pub(crate) fn format_row(row: usize, tx: &Transaction, money: &MoneyFormat) -> String {
    format!(
        "{:>4} │ {:>5} │ {:10} │ {:16} │ {:20} │ {:>12} │ {}",
        row,
        tx.id,
        tx.date.to_string(),
        tx.kind.label(),
        truncate(&tx.category, 20),
        money.format(tx.amount),
        truncate(tx.note.as_deref().unwrap_or(""), 30)
    )
}

/// Parse `column=value` into a typed edit
///
/// Category edits accept any kind's label, matching the table editor's choices.
pub fn parse_assignment(assignment: &str) -> Result<TransactionEdit> {
    let (column, value) = assignment
        .split_once('=')
        .with_context(|| format!("Expected column=value, got '{}'", assignment))?;

    let column: Column = column.trim().parse().map_err(anyhow::Error::msg)?;
    let value = if column == Column::Category {
        resolve_any_category(value)?
    } else {
        value
    };

    Ok(TransactionEdit::parse(column, value)?)
}

pub fn cmd_edit(
    db: &Database,
    view: &ViewOptions,
    row: usize,
    assignments: &[String],
) -> Result<()> {
    let mut batch = EditBatch::new();
    for assignment in assignments {
        batch = batch.edit(row, parse_assignment(assignment)?);
    }

    let outcome = apply_to_view(db, view, &batch)?;
    println!("💾 Row {} updated ({} change(s))", row, outcome.updated);
    Ok(())
}

pub fn cmd_delete(db: &Database, view: &ViewOptions, rows: &[usize]) -> Result<()> {
    let batch = rows.iter().fold(EditBatch::new(), |b, row| b.delete(*row));

    let outcome = apply_to_view(db, view, &batch)?;
    println!("🗑️  Deleted {} transaction(s)", outcome.deleted);
    Ok(())
}

pub fn cmd_apply(db: &Database, view: &ViewOptions, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let batch = EditBatch::from_json(&json)
        .with_context(|| format!("Invalid edit batch in {}", file.display()))?;

    if batch.is_empty() {
        println!("Nothing to apply.");
        return Ok(());
    }

    let outcome = apply_to_view(db, view, &batch)?;
    println!("💾 Changes saved");
    println!("   Updated cells: {}", outcome.updated);
    println!("   Deleted rows:  {}", outcome.deleted);
    Ok(())
}

/// Resolve row numbers against the current view and apply in one transaction
fn apply_to_view(db: &Database, view: &ViewOptions, batch: &EditBatch) -> Result<BatchOutcome> {
    let rows = view.visible(db)?;
    let resolved = batch.resolve(&rows)?;
    db.apply_batch(&resolved)
        .context("Failed to save changes (nothing was written)")
}
