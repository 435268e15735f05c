//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_settings` - Settings file resolution
//! - `ViewOptions` - Active filter, today's date and money format
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::{Database, MoneyFormat, Settings, TimeFilter, Transaction};

/// How the current command looks at the data
///
/// The filter is always carried explicitly; nothing reads it from global state.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub filter: TimeFilter,
    pub today: NaiveDate,
    pub money: MoneyFormat,
}

impl ViewOptions {
    pub fn new(filter: TimeFilter, today: NaiveDate, money: MoneyFormat) -> Self {
        Self {
            filter,
            today,
            money,
        }
    }

    /// Use the local calendar date
    pub fn today(filter: TimeFilter, money: MoneyFormat) -> Self {
        Self::new(filter, Local::now().date_naive(), money)
    }

    /// The filtered rows, newest first; row numbers index into this
    pub fn visible(&self, db: &Database) -> Result<Vec<Transaction>> {
        let all = db.list_transactions().context("Failed to load transactions")?;
        Ok(self.filter.apply(self.today, &all))
    }

    /// Money format with cents, for tables
    pub fn money_cents(&self) -> MoneyFormat {
        self.money.clone().precision(2)
    }
}

/// Load settings from --config, the user config directory, or built-in defaults
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    Settings::load(path).context("Failed to load settings")
}

/// Open the database, creating the schema if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

/// Read every transaction, or an empty list if the store is unreachable
///
/// Read-only views stay usable in degraded mode; the error is still shown.
pub fn load_all_or_empty(db_path: &Path) -> Vec<Transaction> {
    let loaded = open_db(db_path).and_then(|db| {
        db.list_transactions()
            .context("Failed to load transactions")
    });

    match loaded {
        Ok(all) => all,
        Err(e) => {
            tracing::warn!("Showing an empty view: {:#}", e);
            // stderr keeps `dashboard --json` output parseable
            eprintln!("❌ {:#}", e);
            eprintln!();
            Vec::new()
        }
    }
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_transactions()?;
    println!("   Transactions: {}", count);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: tally add expense --amount 12.50 --category Food");
    println!("  2. See where you stand: tally dashboard");

    Ok(())
}
