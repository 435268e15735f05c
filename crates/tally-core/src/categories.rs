//! Category lists per transaction kind
//!
//! The entry form offers only the categories of the selected kind, and the
//! validation layer checks against the same table. The store itself does not
//! enforce it, so inline edits can still move a row to any label.

use crate::error::{Error, Result};
use crate::models::TransactionKind;

const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Home",
    "Utilities",
    "Leisure",
    "Health",
    "Education",
    "Shopping",
    "Subscriptions",
    "Other",
];

const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Occasional Sale",
    "Gift",
    "Investment",
    "Refund",
    "Other Income",
];

const SAVINGS_DEPOSIT_CATEGORIES: &[&str] = &[
    "Emergency Fund",
    "Vacation",
    "Future Goal",
    "Long-Term Investment",
    "Piggy Bank",
];

const SAVINGS_WITHDRAWAL_CATEGORIES: &[&str] = &[
    "Emergency Use",
    "Planned Expense",
    "Executed Investment",
    "Other Withdrawal",
];

/// Categories offered for a kind, in display order
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Expense => EXPENSE_CATEGORIES,
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::SavingsDeposit => SAVINGS_DEPOSIT_CATEGORIES,
        TransactionKind::SavingsWithdrawal => SAVINGS_WITHDRAWAL_CATEGORIES,
    }
}

/// Every category of every kind, in kind order (the table editor's choice list)
pub fn all_categories() -> Vec<&'static str> {
    TransactionKind::all()
        .iter()
        .flat_map(|kind| categories_for(*kind).iter().copied())
        .collect()
}

/// Preselected category when the entry form switches kind
pub fn default_category(kind: TransactionKind) -> &'static str {
    categories_for(kind)[0]
}

pub fn is_known_category(kind: TransactionKind, category: &str) -> bool {
    categories_for(kind).contains(&category)
}

/// Resolve user input to the canonical label of `kind` (case-insensitive)
pub fn resolve_category(kind: TransactionKind, input: &str) -> Result<&'static str> {
    let wanted = input.trim();
    categories_for(kind)
        .iter()
        .find(|c| c.eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| {
            Error::Validation(format!(
                "Unknown {} category: {}. Available: {}",
                kind.label().to_lowercase(),
                wanted,
                categories_for(kind).join(", ")
            ))
        })
}

/// Resolve a label from any kind's list, as the table editor allows
pub fn resolve_any_category(input: &str) -> Result<&'static str> {
    let wanted = input.trim();
    all_categories()
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| Error::Validation(format!("Unknown category: {}", wanted)))
}
