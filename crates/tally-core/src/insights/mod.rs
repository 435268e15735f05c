//! Insight Engine - short textual observations about spending and savings
//!
//! Rules run in a fixed order over an [`AnalysisContext`]. Spending rules see
//! the filtered view; savings rules see totals over the whole history.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::{AnalysisContext, InsightEngine};
//!
//! let ctx = AnalysisContext::new(&filtered, &history, &money);
//! for insight in InsightEngine::new().generate(&ctx) {
//!     println!("{insight}");
//! }
//! ```

pub mod engine;
pub mod savings;
pub mod spending;
pub mod types;

pub use engine::{AnalysisContext, InsightEngine, InsightRule};
pub use savings::{SavingsBalanceRule, SavingsWithdrawalRule};
pub use spending::SpendingRule;
pub use types::{Insight, InsightKind};
