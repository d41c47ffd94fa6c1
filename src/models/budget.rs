//! Budget models
//!
//! A budget caps spending for one category in one calendar month. An overall
//! budget caps spending across every category in a month.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{Money, MAX_AMOUNT};
use super::period::Period;

/// A spending cap for a category in a period
///
/// Keyed on (category, period): the store holds at most one per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Normalized category label
    pub category: String,

    #[serde(flatten)]
    pub period: Period,

    /// Spending cap, always positive
    pub limit: Money,
}

impl Budget {
    pub fn new(category: impl Into<String>, period: Period, limit: Money) -> Self {
        Self {
            category: category.into(),
            period,
            limit,
        }
    }

    /// Check whether this budget is stored under the given key
    pub fn is_for(&self, category: &str, period: Period) -> bool {
        self.category == category && self.period == period
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        validate_limit(self.limit)?;
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }
        Ok(())
    }

    /// Key used in messages and audit entries, e.g. "Food 2024-01"
    pub fn key(&self) -> String {
        format!("{} {}", self.category, self.period)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.period, self.category, self.limit)
    }
}

/// A spending cap across all categories for a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallBudget {
    #[serde(flatten)]
    pub period: Period,

    pub limit: Money,
}

impl OverallBudget {
    pub fn new(period: Period, limit: Money) -> Self {
        Self { period, limit }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        validate_limit(self.limit)
    }
}

impl fmt::Display for OverallBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} total: {}", self.period, self.limit)
    }
}

fn validate_limit(limit: Money) -> Result<(), BudgetValidationError> {
    if !limit.is_positive() {
        Err(BudgetValidationError::NonPositiveLimit(limit))
    } else if limit.exceeds_max() {
        Err(BudgetValidationError::LimitTooLarge(limit))
    } else {
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit(Money),
    LimitTooLarge(Money),
    EmptyCategory,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be positive, got {}", limit)
            }
            Self::LimitTooLarge(limit) => {
                write!(f, "Budget limit {} is above the maximum of {}", limit, MAX_AMOUNT)
            }
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
