//! Core types for the insight generator

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an insight is about, with the figures it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InsightKind {
    /// Nothing recorded in the current view yet
    Welcome,
    /// Category with the largest summed expenses
    TopExpenseCategory { category: String, total: Decimal },
    /// Mean amount per expense operation
    AverageExpense { average: Decimal, operations: usize },
    /// Nothing has ever been deposited into savings
    SavingsTip,
    /// Positive net savings over the whole history
    SavingsProgress { net_savings: Decimal },
    /// Total ever withdrawn from savings
    SavingsWithdrawn { total_withdrawn: Decimal },
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::TopExpenseCategory { .. } => "top_expense_category",
            Self::AverageExpense { .. } => "average_expense",
            Self::SavingsTip => "savings_tip",
            Self::SavingsProgress { .. } => "savings_progress",
            Self::SavingsWithdrawn { .. } => "savings_withdrawn",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Welcome => "👋",
            Self::TopExpenseCategory { .. } => "🔥",
            Self::AverageExpense { .. } => "📊",
            Self::SavingsTip => "💡",
            Self::SavingsProgress { .. } => "🐖",
            Self::SavingsWithdrawn { .. } => "📉",
        }
    }
}

/// A single observation shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(flatten)]
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.message)
    }
}
