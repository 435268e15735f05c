//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Database access and schema setup
//! - Transaction models and per-kind category lists
//! - Time filters, aggregate metrics and chart data
//! - Rule-based insight engine
//! - Dashboard assembly, table edit batches and export
//! - User settings

pub mod categories;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod edits;
pub mod error;
pub mod export;
pub mod format;
pub mod insights;
pub mod metrics;
pub mod models;
pub mod period;

pub use config::Settings;
pub use dashboard::{Dashboard, EntryVisibility, HeroMetrics};
pub use db::{BatchOutcome, Database};
pub use edits::{EditBatch, ResolvedBatch};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use format::MoneyFormat;
pub use insights::{Insight, InsightEngine, InsightKind};
pub use metrics::{CategoryTotal, PeriodTotal, Summary};
pub use models::{Column, NewTransaction, Transaction, TransactionEdit, TransactionKind};
pub use period::{Granularity, TimeFilter};
