//! Dashboard assembly
//!
//! Every user action ends the same way: reload all transactions, compute the
//! history totals, cut the filtered view, and derive metrics, insights and
//! chart data from it. `Dashboard::build` is that pipeline in one place.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::MoneyFormat;
use crate::insights::{AnalysisContext, Insight, InsightEngine};
use crate::metrics::{
    expense_timeline, expenses_by_category, CategoryTotal, PeriodTotal, Summary,
};
use crate::models::Transaction;
use crate::period::{Granularity, TimeFilter};

/// Everything the presentation layer shows for one filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub filter: TimeFilter,
    pub today: NaiveDate,
    /// Inclusive window; `None` for all time
    pub range: Option<(NaiveDate, NaiveDate)>,
    /// Totals over the whole history, regardless of filter
    pub history: Summary,
    /// Totals over the filtered view
    pub summary: Summary,
    pub insights: Vec<Insight>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub granularity: Granularity,
    pub expense_timeline: Vec<PeriodTotal>,
    /// Filtered rows, newest first; row positions index into this
    pub transactions: Vec<Transaction>,
}

/// Headline figures shown above everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeroMetrics {
    pub available_cash: Decimal,
    pub net_savings: Decimal,
    /// Income minus expenses within the filter
    pub simple_balance: Decimal,
}

impl Dashboard {
    /// Build with the default money format
    pub fn build(all: &[Transaction], filter: TimeFilter, today: NaiveDate) -> Self {
        Self::build_with(all, filter, today, &MoneyFormat::default())
    }

    pub fn build_with(
        all: &[Transaction],
        filter: TimeFilter,
        today: NaiveDate,
        money: &MoneyFormat,
    ) -> Self {
        let history = Summary::from_transactions(all);
        let transactions = filter.apply(today, all);
        let summary = Summary::from_transactions(&transactions);

        let ctx = AnalysisContext::new(&transactions, &history, money);
        let insights = InsightEngine::new().generate(&ctx);

        let granularity = filter.granularity();
        tracing::debug!(
            filter = filter.as_str(),
            total = all.len(),
            visible = transactions.len(),
            "Dashboard built"
        );

        Self {
            filter,
            today,
            range: filter.date_range(today),
            history,
            summary,
            insights,
            expenses_by_category: expenses_by_category(&transactions),
            granularity,
            expense_timeline: expense_timeline(&transactions, granularity),
            transactions,
        }
    }

    /// Degraded view used when the store cannot be read
    pub fn empty(filter: TimeFilter, today: NaiveDate) -> Self {
        Self::build(&[], filter, today)
    }

    pub fn hero(&self) -> HeroMetrics {
        HeroMetrics {
            available_cash: self.history.available_cash(),
            net_savings: self.history.net_savings(),
            simple_balance: self.summary.simple_balance(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Where a freshly saved transaction ended up relative to the active view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryVisibility {
    Visible,
    Hidden(TimeFilter),
}

impl EntryVisibility {
    /// Uses the same window as the view itself
    pub fn check(filter: TimeFilter, today: NaiveDate, date: NaiveDate) -> Self {
        if filter.contains(today, date) {
            Self::Visible
        } else {
            Self::Hidden(filter)
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Visible => "Transaction saved".to_string(),
            Self::Hidden(filter) => {
                format!("Saved (not visible in filter '{}')", filter.label())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::InsightKind;
    use crate::models::TransactionKind;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(
        id: i64,
        day: NaiveDate,
        kind: TransactionKind,
        category: &str,
        amount: Decimal,
    ) -> Transaction {
        Transaction {
            id,
            date: day,
            kind,
            category: category.to_string(),
            amount,
            note: None,
        }
    }

    fn history() -> Vec<Transaction> {
        vec![
            tx(5, date(2024, 3, 14), TransactionKind::Expense, "Food", dec!(40)),
            tx(4, date(2024, 3, 11), TransactionKind::Income, "Salary", dec!(1000)),
            tx(3, date(2024, 3, 2), TransactionKind::Expense, "Home", dec!(300)),
            tx(2, date(2024, 2, 20), TransactionKind::SavingsDeposit, "Vacation", dec!(200)),
            tx(
                1,
                date(2024, 1, 5),
                TransactionKind::SavingsWithdrawal,
                "Emergency Use",
                dec!(50),
            ),
        ]
    }

    #[test]
    fn test_all_time_view() {
        let d = Dashboard::build(&history(), TimeFilter::AllTime, date(2024, 3, 14));
        assert_eq!(d.range, None);
        assert_eq!(d.transactions.len(), 5);
        assert_eq!(d.summary, d.history);
        assert_eq!(d.granularity, Granularity::Month);
        assert_eq!(d.expense_timeline.len(), 1);
        assert_eq!(d.expense_timeline[0].period, "2024-03");
        assert_eq!(d.expense_timeline[0].total, dec!(340));
    }

    #[test]
    fn test_week_view_keeps_history_metrics() {
        // 2024-03-14 is a Thursday: week is 03-11 ..= 03-17
        let d = Dashboard::build(&history(), TimeFilter::ThisWeek, date(2024, 3, 14));
        assert_eq!(d.range, Some((date(2024, 3, 11), date(2024, 3, 17))));
        let ids: Vec<i64> = d.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 4]);

        let hero = d.hero();
        assert_eq!(hero.available_cash, dec!(510));
        assert_eq!(hero.net_savings, dec!(150));
        assert_eq!(hero.simple_balance, dec!(960));

        assert_eq!(d.granularity, Granularity::Day);
        assert_eq!(d.expenses_by_category.len(), 1);
        assert_eq!(d.expenses_by_category[0].category, "Food");
    }

    #[test]
    fn test_insights_mix_view_and_history() {
        let d = Dashboard::build(&history(), TimeFilter::ThisWeek, date(2024, 3, 14));
        let kinds: Vec<&str> = d.insights.iter().map(|i| i.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec![
                "top_expense_category",
                "average_expense",
                "savings_progress",
                "savings_withdrawn"
            ]
        );
    }

    #[test]
    fn test_empty_filter_window() {
        let d = Dashboard::build(&history(), TimeFilter::ThisMonth, date(2024, 5, 1));
        assert!(d.is_empty());
        assert_eq!(d.summary, Summary::default());
        assert_eq!(d.insights.len(), 1);
        assert_eq!(d.insights[0].kind, InsightKind::Welcome);
        // Global metrics still reflect the whole history
        assert_eq!(d.hero().net_savings, dec!(150));
        assert_eq!(d.hero().simple_balance, Decimal::ZERO);
    }

    #[test]
    fn test_oversized_rows_do_not_break_the_build() {
        let huge = vec![
            tx(2, date(2024, 3, 2), TransactionKind::Expense, "Home", Decimal::MAX),
            tx(1, date(2024, 3, 1), TransactionKind::Expense, "Home", Decimal::MAX),
        ];
        let d = Dashboard::build(&huge, TimeFilter::AllTime, date(2024, 3, 14));
        assert_eq!(d.summary.total_expense, Decimal::MAX);
        assert_eq!(d.hero().available_cash, Decimal::MIN);
        assert_eq!(d.insights[0].kind.as_str(), "top_expense_category");
    }

    #[test]
    fn test_degraded_dashboard_is_zeroed() {
        let d = Dashboard::empty(TimeFilter::AllTime, date(2024, 1, 1));
        assert!(d.is_empty());
        assert_eq!(
            d.hero(),
            HeroMetrics {
                available_cash: Decimal::ZERO,
                net_savings: Decimal::ZERO,
                simple_balance: Decimal::ZERO
            }
        );
    }

    #[test]
    fn test_entry_visibility_uses_full_window() {
        let today = date(2024, 3, 14);
        assert_eq!(
            EntryVisibility::check(TimeFilter::ThisMonth, today, date(2024, 3, 31)),
            EntryVisibility::Visible
        );
        // Future month is outside the window
        let hidden = EntryVisibility::check(TimeFilter::ThisMonth, today, date(2024, 4, 2));
        assert_eq!(hidden, EntryVisibility::Hidden(TimeFilter::ThisMonth));
        assert_eq!(hidden.message(), "Saved (not visible in filter 'This month')");
        assert_eq!(
            EntryVisibility::check(TimeFilter::AllTime, today, date(1999, 1, 1)),
            EntryVisibility::Visible
        );
    }
}
