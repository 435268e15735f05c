//! Domain models for Tally

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What a transaction does to the user's money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
    /// Money moved into savings
    SavingsDeposit,
    /// Money taken back out of savings
    SavingsWithdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::SavingsDeposit => "savings_deposit",
            Self::SavingsWithdrawal => "savings_withdrawal",
        }
    }

    /// Human-readable label for tables and prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
            Self::SavingsDeposit => "Savings",
            Self::SavingsWithdrawal => "Withdraw Savings",
        }
    }

    pub fn all() -> &'static [TransactionKind] {
        &[
            Self::Expense,
            Self::Income,
            Self::SavingsDeposit,
            Self::SavingsWithdrawal,
        ]
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "savings_deposit" | "savings" | "deposit" => Ok(Self::SavingsDeposit),
            "savings_withdrawal" | "withdrawal" | "withdraw" => Ok(Self::SavingsWithdrawal),
            _ => Err(format!(
                "Unknown transaction kind: {}. Available: expense, income, savings-deposit, savings-withdrawal",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    /// Non-negative at entry time; inline edits are not re-validated
    pub amount: Decimal,
    pub note: Option<String>,
}

/// A transaction captured by the entry form, before it has an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            note: None,
        }
    }

    /// Attach a note; blank notes are dropped
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() {
            None
        } else {
            Some(note)
        };
        self
    }

    /// Amount must be strictly positive once rounded to cents, and fit the stored column
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount).map(|_| ())
    }
}

/// Eight integer digits and two decimals, the width of the stored amount column
pub fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Round to cents and pin the scale so "12.5" is stored as "12.50"
pub fn normalize_amount(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// Normalize an amount and check it fits the stored column, sign aside
pub fn check_amount_width(amount: Decimal) -> Result<Decimal> {
    let normalized = normalize_amount(amount);
    if normalized.abs() > max_amount() {
        return Err(Error::Validation(format!(
            "Amount must be at most {} (got {})",
            max_amount(),
            amount
        )));
    }
    Ok(normalized)
}

/// Entry-time amount check: the rounded value must be positive and in range
///
/// Returns the value that will be stored.
pub fn validate_amount(amount: Decimal) -> Result<Decimal> {
    let normalized = check_amount_width(amount)?;
    if normalized <= Decimal::ZERO {
        return Err(Error::Validation(format!(
            "Amount must be greater than 0 (got {})",
            amount
        )));
    }
    Ok(normalized)
}

/// An editable column of the transactions table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Date,
    Kind,
    Category,
    Amount,
    Note,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Kind => "kind",
            Self::Category => "category",
            Self::Amount => "amount",
            Self::Note => "note",
        }
    }
}

impl std::str::FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "kind" => Ok(Self::Kind),
            "category" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            "note" => Ok(Self::Note),
            "id" => Err("Column id is read-only".to_string()),
            _ => Err(format!(
                "Unknown column: {}. Available: date, kind, category, amount, note",
                s
            )),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single column-level change to a stored transaction
///
/// Values are typed so they bind cleanly, but ranges are not checked:
/// an edit may set a zero or negative amount, or a category from another kind.
/// Amounts must still fit the stored column.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionEdit {
    Date(NaiveDate),
    Kind(TransactionKind),
    Category(String),
    Amount(Decimal),
    Note(Option<String>),
}

impl TransactionEdit {
    pub fn column(&self) -> Column {
        match self {
            Self::Date(_) => Column::Date,
            Self::Kind(_) => Column::Kind,
            Self::Category(_) => Column::Category,
            Self::Amount(_) => Column::Amount,
            Self::Note(_) => Column::Note,
        }
    }

    /// Parse a raw cell value for the given column
    pub fn parse(column: Column, value: &str) -> Result<Self> {
        let value = value.trim();
        match column {
            Column::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(Self::Date)
                .map_err(|e| Error::InvalidData(format!("Invalid date '{}': {}", value, e))),
            Column::Kind => value
                .parse()
                .map(Self::Kind)
                .map_err(Error::InvalidData),
            Column::Category => Ok(Self::Category(value.to_string())),
            Column::Amount => value
                .parse::<Decimal>()
                .map(|d| Self::Amount(normalize_amount(d)))
                .map_err(|e| Error::InvalidData(format!("Invalid amount '{}': {}", value, e))),
            Column::Note => Ok(Self::Note(if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            })),
        }
    }

    /// Apply this edit to an in-memory copy
    pub fn apply_to(&self, tx: &mut Transaction) {
        match self {
            Self::Date(d) => tx.date = *d,
            Self::Kind(k) => tx.kind = *k,
            Self::Category(c) => tx.category = c.clone(),
            Self::Amount(a) => tx.amount = *a,
            Self::Note(n) => tx.note = n.clone(),
        }
    }
}
