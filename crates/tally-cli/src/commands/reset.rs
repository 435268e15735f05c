//! Full reset command

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::Database;

use super::open_db;

pub fn cmd_reset(db_path: &Path, yes: bool) -> Result<()> {
    if !db_path.exists() {
        anyhow::bail!("Database not found: {}", db_path.display());
    }

    if !yes {
        let stdin = io::stdin();
        if !confirm_reset(&mut stdin.lock(), &mut io::stdout())? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let db = open_db(db_path)?;
    reset_database(&db)?;
    Ok(())
}

/// Ask before wiping; only an explicit "y" proceeds
pub fn confirm_reset<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    writeln!(output, "⚠️  This will DELETE every transaction and restart ids at 1.")?;
    writeln!(output, "   There is no undo.")?;
    writeln!(output)?;
    write!(output, "Are you sure? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

pub fn reset_database(db: &Database) -> Result<usize> {
    let removed = db
        .delete_all_transactions()
        .context("Failed to reset database")?;

    println!("💥 Database reset complete.");
    println!("   Removed: {} transaction(s)", removed);
    Ok(removed)
}
