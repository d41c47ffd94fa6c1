//! Expense model
//!
//! An expense is a single dated spending record. Expenses are immutable once
//! created; an edit is a delete followed by an add.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::{Money, MAX_AMOUNT};

/// Date format used for expense dates on input and in the ledger file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single spending record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Amount spent, always positive
    pub amount: Money,

    /// Normalized category label
    pub category: String,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: Option<String>,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with a fresh id
    ///
    /// The category must already be normalized; validation is done by the
    /// caller before the expense reaches the store.
    pub fn new(
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        description: Option<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            category: category.into(),
            date,
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            created_at: Utc::now(),
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.exceeds_max() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        Ok(())
    }

    /// Ordering used for listings: date ascending, then creation time, then id
    pub fn chronological_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.date
            .cmp(&other.date)
            .then(self.created_at.cmp(&other.created_at))
            .then(self.id.cmp(&other.id))
    }

    /// Short label for audit logs and messages
    pub fn label(&self) -> String {
        format!("{} {} {}", self.date.format(DATE_FORMAT), self.category, self.amount)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id,
            self.date.format(DATE_FORMAT),
            self.category,
            self.amount
        )?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}

/// Parse an expense date in "YYYY-MM-DD" form
pub fn parse_date(s: &str) -> Result<NaiveDate, ExpenseValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseValidationError::MalformedDate(s.trim().to_string()))
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyCategory,
    MalformedDate(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Expense amount {} is above the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
            Self::MalformedDate(s) => {
                write!(f, "Invalid date '{}' (expected YYYY-MM-DD)", s)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new(Money::from_units(50), "Food", jan(5), None);
        assert_eq!(expense.amount.cents(), 5000);
        assert_eq!(expense.category, "Food");
        assert!(expense.description.is_none());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_blank_description_dropped() {
        let expense = Expense::new(Money::from_units(5), "Food", jan(5), Some("  ".into()));
        assert!(expense.description.is_none());

        let expense = Expense::new(Money::from_units(5), "Food", jan(5), Some(" lunch ".into()));
        assert_eq!(expense.description.as_deref(), Some("lunch"));
    }

    #[test]
    fn test_validate_amount() {
        let zero = Expense::new(Money::zero(), "Food", jan(5), None);
        assert!(matches!(
            zero.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));

        let negative = Expense::new(Money::from_cents(-100), "Food", jan(5), None);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_amount_above_max() {
        let at_max = Expense::new(MAX_AMOUNT, "Food", jan(5), None);
        assert!(at_max.validate().is_ok());

        let huge = Money::from_cents(i64::MAX);
        let over = Expense::new(huge, "Food", jan(5), None);
        assert_eq!(
            over.validate(),
            Err(ExpenseValidationError::AmountTooLarge(huge))
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-05").unwrap(), jan(5));
        assert_eq!(
            parse_date("2024-02-30"),
            Err(ExpenseValidationError::MalformedDate("2024-02-30".into()))
        );
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn test_chronological_order() {
        let later = Expense::new(Money::from_units(1), "Food", jan(20), None);
        let earlier = Expense::new(Money::from_units(1), "Food", jan(5), None);
        assert_eq!(
            earlier.chronological_cmp(&later),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let expense = Expense::new(Money::from_cents(1234), "Travel", jan(9), Some("taxi".into()));
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"date\":\"2024-01-09\""));
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }
}
