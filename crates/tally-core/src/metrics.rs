//! Aggregate metrics over a set of transactions
//!
//! Savings are treated as a separate pot outside day-to-day cash: a deposit
//! leaves available cash and a withdrawal returns to it.
//!
//! Sums saturate at the `Decimal` bounds instead of panicking, so rows that
//! predate the amount width check can still be displayed.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionKind};
use crate::period::Granularity;

/// Per-kind totals with the derived balances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_savings_deposits: Decimal,
    pub total_savings_withdrawals: Decimal,
    pub transaction_count: usize,
}

impl Summary {
    /// Sum every kind in a single pass
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut acc, tx| {
            match tx.kind {
                TransactionKind::Income => {
                    acc.total_income = acc.total_income.saturating_add(tx.amount)
                }
                TransactionKind::Expense => {
                    acc.total_expense = acc.total_expense.saturating_add(tx.amount)
                }
                TransactionKind::SavingsDeposit => {
                    acc.total_savings_deposits =
                        acc.total_savings_deposits.saturating_add(tx.amount)
                }
                TransactionKind::SavingsWithdrawal => {
                    acc.total_savings_withdrawals =
                        acc.total_savings_withdrawals.saturating_add(tx.amount)
                }
            }
            acc.transaction_count += 1;
            acc
        })
    }

    /// Deposits minus withdrawals
    pub fn net_savings(&self) -> Decimal {
        self.total_savings_deposits
            .saturating_sub(self.total_savings_withdrawals)
    }

    /// Income minus expenses minus deposits plus withdrawals
    pub fn available_cash(&self) -> Decimal {
        self.simple_balance()
            .saturating_sub(self.total_savings_deposits)
            .saturating_add(self.total_savings_withdrawals)
    }

    /// Income minus expenses, ignoring savings movements
    pub fn simple_balance(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expense)
    }
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

/// Expense total for one timeline bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub period: String,
    pub total: Decimal,
}

/// Expenses grouped by category, largest first (ties by name)
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut grouped: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
    {
        let entry = grouped.entry(tx.category.as_str()).or_default();
        entry.0 = entry.0.saturating_add(tx.amount);
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();
    // BTreeMap already yields names ascending, so a stable sort keeps that as tie-break
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Expenses bucketed by day or month, oldest first
pub fn expense_timeline(
    transactions: &[Transaction],
    granularity: Granularity,
) -> Vec<PeriodTotal> {
    let mut grouped: BTreeMap<String, Decimal> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
    {
        let total = grouped.entry(granularity.period_key(tx.date)).or_default();
        *total = total.saturating_add(tx.amount);
    }

    grouped
        .into_iter()
        .map(|(period, total)| PeriodTotal { period, total })
        .collect()
}
