//! Spending rule
//!
//! Names the category with the largest expense total in the current view
//! and the mean amount per expense operation.

use rust_decimal::Decimal;

use crate::metrics::expenses_by_category;

use super::engine::{AnalysisContext, InsightRule};
use super::types::{Insight, InsightKind};

pub struct SpendingRule;

impl InsightRule for SpendingRule {
    fn id(&self) -> &'static str {
        "spending"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        // Sorted by total descending, ties by category name ascending
        let by_category = expenses_by_category(ctx.filtered);
        let Some(top) = by_category.first() else {
            return Vec::new();
        };

        let (total, operations) = by_category
            .iter()
            .fold((Decimal::ZERO, 0usize), |(sum, n), c| {
                (sum.saturating_add(c.total), n + c.count)
            });
        let average = total / Decimal::from(operations);

        vec![
            Insight::new(
                InsightKind::TopExpenseCategory {
                    category: top.category.clone(),
                    total: top.total,
                },
                format!(
                    "Your biggest expense is {} ({}).",
                    top.category,
                    ctx.money.format(top.total)
                ),
            ),
            Insight::new(
                InsightKind::AverageExpense {
                    average,
                    operations,
                },
                format!(
                    "You spend an average of {} per operation.",
                    ctx.money.format(average)
                ),
            ),
        ]
    }
}
