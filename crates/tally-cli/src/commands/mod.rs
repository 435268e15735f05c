//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, settings, view options)
//! - `export` - CSV/JSON export of the filtered view
//! - `reports` - Dashboard and insights
//! - `reset` - Destructive full reset
//! - `transactions` - Add, list, edit, delete, apply batches, categories

pub mod core;
pub mod export;
pub mod reports;
pub mod reset;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use export::*;
pub use reports::*;
pub use reset::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
