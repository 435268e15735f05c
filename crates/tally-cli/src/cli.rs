//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tally_core::{ExportFormat, TimeFilter, TransactionKind};

/// Tally - Track income, expenses and savings
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker with savings-aware balances", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Time filter: all, this-month, this-week
    #[arg(short, long, global = true)]
    pub filter: Option<TimeFilter>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a transaction
    Add {
        /// Kind: expense, income, savings-deposit, savings-withdrawal
        kind: TransactionKind,

        /// Amount (must be greater than 0)
        #[arg(short, long, allow_negative_numbers = true)]
        amount: Decimal,

        /// Category (defaults to the first category of the kind)
        #[arg(short, long)]
        category: Option<String>,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Show the categories offered for each kind
    Categories {
        /// Only this kind
        kind: Option<TransactionKind>,
    },

    /// List transactions in the active filter with their row numbers
    List,

    /// Show metrics, insights and charts
    Dashboard {
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show insights only
    Insights,

    /// Edit cells of one row of the filtered view
    Edit {
        /// Row number as shown by `tally list`
        #[arg(short, long)]
        row: usize,

        /// Cell change as column=value (repeatable)
        #[arg(short, long = "set", value_name = "COLUMN=VALUE", required = true)]
        set: Vec<String>,
    },

    /// Delete rows of the filtered view
    Delete {
        /// Row numbers as shown by `tally list`
        #[arg(short, long = "row", value_name = "ROW", required = true, num_args = 1..)]
        rows: Vec<usize>,
    },

    /// Apply a table edit batch (JSON) atomically
    Apply {
        /// Batch file: {"edited_rows": {"0": {"amount": "12.50"}}, "deleted_rows": [3]}
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete ALL transactions and restart ids
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the filtered view
    Export {
        /// Output format: csv, json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
