//! Time filters for the transaction view
//!
//! A filter is always passed in explicitly together with "today"; nothing
//! here reads a clock or shared state, so the dashboard and the post-insert
//! visibility check agree on the window by construction.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Which slice of history the view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFilter {
    #[default]
    #[serde(alias = "all")]
    AllTime,
    ThisMonth,
    ThisWeek,
}

/// Bucket size for the expense timeline chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
        }
    }

    /// Period key for a date: `YYYY-MM-DD` or `YYYY-MM`
    pub fn period_key(&self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Month => date.format("%Y-%m").to_string(),
        }
    }
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllTime => "all",
            Self::ThisMonth => "this-month",
            Self::ThisWeek => "this-week",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AllTime => "All time",
            Self::ThisMonth => "This month",
            Self::ThisWeek => "This week",
        }
    }

    /// Inclusive date window, or `None` when nothing is filtered out
    pub fn date_range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::AllTime => None,
            Self::ThisWeek => {
                let offset = i64::from(today.weekday().num_days_from_monday());
                let start = today - Duration::days(offset);
                Some((start, start + Duration::days(6)))
            }
            Self::ThisMonth => {
                let start = today.with_day(1)?;
                // Day 28 exists in every month and +4 always crosses into the next one
                let next_month = today.with_day(28)? + Duration::days(4);
                let end = next_month - Duration::days(i64::from(next_month.day()));
                Some((start, end))
            }
        }
    }

    /// Whether a transaction dated `date` is visible under this filter
    pub fn contains(&self, today: NaiveDate, date: NaiveDate) -> bool {
        match self.date_range(today) {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }

    /// Keep the visible transactions, preserving input order
    pub fn apply(&self, today: NaiveDate, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|tx| self.contains(today, tx.date))
            .cloned()
            .collect()
    }

    /// All-time views chart by month, shorter windows by day
    pub fn granularity(&self) -> Granularity {
        match self {
            Self::AllTime => Granularity::Month,
            Self::ThisMonth | Self::ThisWeek => Granularity::Day,
        }
    }
}

impl std::str::FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "all" | "all-time" => Ok(Self::AllTime),
            "this-month" | "month" => Ok(Self::ThisMonth),
            "this-week" | "week" => Ok(Self::ThisWeek),
            _ => Err(format!(
                "Unknown filter: {}. Available: all, this-month, this-week",
                s
            )),
        }
    }
}

impl std::fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
