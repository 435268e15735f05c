//! Savings rules
//!
//! Both rules read the full-history summary, never the filtered view, so a
//! narrow filter does not hide how much has been put aside overall.

use rust_decimal::Decimal;

use super::engine::{AnalysisContext, InsightRule};
use super::types::{Insight, InsightKind};

/// Nudge to start saving, or report the current net savings
pub struct SavingsBalanceRule;

impl InsightRule for SavingsBalanceRule {
    fn id(&self) -> &'static str {
        "savings_balance"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let net = ctx.history.net_savings();

        if net > Decimal::ZERO {
            return vec![Insight::new(
                InsightKind::SavingsProgress { net_savings: net },
                format!(
                    "Keep it up! You have {} safe in your piggy bank.",
                    ctx.money.format(net)
                ),
            )];
        }

        // Only when nothing was ever deposited; an emptied pot says nothing
        if ctx.history.total_savings_deposits.is_zero() {
            return vec![Insight::new(
                InsightKind::SavingsTip,
                "Tip: try to set aside 5-10% of your income!",
            )];
        }

        Vec::new()
    }
}

pub struct SavingsWithdrawalRule;

impl InsightRule for SavingsWithdrawalRule {
    fn id(&self) -> &'static str {
        "savings_withdrawals"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let withdrawn = ctx.history.total_savings_withdrawals;
        if withdrawn <= Decimal::ZERO {
            return Vec::new();
        }

        vec![Insight::new(
            InsightKind::SavingsWithdrawn {
                total_withdrawn: withdrawn,
            },
            format!(
                "You have withdrawn {} from your historical savings.",
                ctx.money.format(withdrawn)
            ),
        )]
    }
}
