//! Insight engine - runs the registered rules in order

use crate::format::MoneyFormat;
use crate::metrics::Summary;
use crate::models::Transaction;

use super::types::{Insight, InsightKind};
use super::{SavingsBalanceRule, SavingsWithdrawalRule, SpendingRule};

/// Inputs shared by every rule
///
/// `filtered` is the current view; `history` holds totals over the full,
/// unfiltered history. Spending rules look at the former, savings rules at
/// the latter, regardless of the active filter.
pub struct AnalysisContext<'a> {
    pub filtered: &'a [Transaction],
    pub history: &'a Summary,
    pub money: &'a MoneyFormat,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(filtered: &'a [Transaction], history: &'a Summary, money: &'a MoneyFormat) -> Self {
        Self {
            filtered,
            history,
            money,
        }
    }
}

/// A rule that turns transaction data into zero or more insights
pub trait InsightRule: Send + Sync {
    /// Stable identifier, used in logs
    fn id(&self) -> &'static str;

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight>;
}

/// Produces the ordered insight list for a view
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(SpendingRule));
        engine.register(Box::new(SavingsBalanceRule));
        engine.register(Box::new(SavingsWithdrawalRule));

        engine
    }

    /// Append a rule; rules run in registration order
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Run every rule, or return only the onboarding message for an empty view
    pub fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        if ctx.filtered.is_empty() {
            return vec![welcome()];
        }

        let mut insights = Vec::new();
        for rule in &self.rules {
            let produced = rule.evaluate(ctx);
            tracing::debug!(rule = rule.id(), count = produced.len(), "Insight rule evaluated");
            insights.extend(produced);
        }
        insights
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

fn welcome() -> Insight {
    Insight::new(
        InsightKind::Welcome,
        "Welcome! Start by recording your first transaction.",
    )
}
