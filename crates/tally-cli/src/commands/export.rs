//! Export command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::export::{export_transactions, ExportFormat};
use tally_core::Database;

use super::ViewOptions;

pub fn cmd_export(
    db: &Database,
    view: &ViewOptions,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let transactions = view.visible(db)?;
    let rendered =
        export_transactions(&transactions, format).context("Failed to export transactions")?;

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "📤 Exported {} transaction(s) ({}) to {}",
                transactions.len(),
                view.filter.label(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
