//! Expense service
//!
//! Validation, normalization and audit logging for adding, deleting and
//! listing expenses.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expense listings
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses in this category (normalized like new records)
    pub category: Option<String>,
    /// Inclusive lower bound on the date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the date
    pub end_date: Option<NaiveDate>,
    /// Keep at most this many of the most recent matches
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn from_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn to_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl CreateExpenseInput {
    pub fn new(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build an input from user-entered text
    ///
    /// `date` defaults to `today` when absent. Malformed amounts and dates are
    /// validation errors.
    pub fn from_text(
        amount: &str,
        category: &str,
        date: Option<&str>,
        description: Option<String>,
        today: NaiveDate,
    ) -> TrackerResult<Self> {
        let amount = Money::parse(amount).map_err(|e| TrackerError::Validation(e.to_string()))?;
        let date = match date {
            Some(text) => parse_date(text).map_err(|e| TrackerError::Validation(e.to_string()))?,
            None => today,
        };

        Ok(Self {
            amount,
            category: category.to_string(),
            date,
            description,
        })
    }
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense and return its id
    ///
    /// Fails with a validation error, before anything is changed, if the
    /// amount is not positive or the category is empty.
    pub fn add(&self, input: CreateExpenseInput) -> TrackerResult<ExpenseId> {
        let category = self
            .storage
            .category_policy()
            .normalize(&input.category)
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let mut expense = Expense::new(input.amount, category, input.date, input.description);
        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let expense = self.storage.ledger.transact(|data| {
            while data.contains_expense(expense.id) {
                expense.id = ExpenseId::new();
            }
            data.expenses.push(expense.clone());
            Ok(expense)
        })?;

        tracing::debug!(id = %expense.id, "added expense");
        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.label()),
            &expense,
        );

        Ok(expense.id)
    }

    /// Delete an expense by id, returning the removed record
    pub fn delete(&self, id: ExpenseId) -> TrackerResult<Expense> {
        let removed = self.storage.ledger.transact(|data| {
            let index = data
                .expenses
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;
            Ok(data.expenses.remove(index))
        })?;

        tracing::debug!(id = %removed.id, "deleted expense");
        self.storage.log_delete(
            EntityType::Expense,
            removed.id.to_string(),
            Some(removed.label()),
            &removed,
        );

        Ok(removed)
    }

    pub fn get(&self, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        self.storage
            .ledger
            .read(|data| data.expenses.iter().find(|e| e.id == id).cloned())
    }

    /// Resolve user-entered text to an expense id
    ///
    /// Accepts a full UUID, the "exp-xxxxxxxx" display form, or any unique
    /// prefix of the UUID.
    pub fn resolve_id(&self, text: &str) -> TrackerResult<ExpenseId> {
        let matches: Vec<ExpenseId> = self.storage.ledger.read(|data| {
            data.expenses
                .iter()
                .map(|e| e.id)
                .filter(|id| id.matches_prefix(text))
                .collect()
        })?;

        match matches.as_slice() {
            [] => Err(TrackerError::expense_not_found(text.trim())),
            [id] => Ok(*id),
            _ => Err(TrackerError::Validation(format!(
                "'{}' matches {} expenses; use more characters of the id",
                text.trim(),
                matches.len()
            ))),
        }
    }

    /// List expenses ordered by date ascending
    pub fn list(&self, filter: &ExpenseFilter) -> TrackerResult<Vec<Expense>> {
        // Filter categories are normalized like stored ones; a filter that
        // normalizes to nothing matches nothing.
        let category = match &filter.category {
            Some(raw) => match self.storage.category_policy().normalize(raw) {
                Ok(category) => Some(category),
                Err(_) => return Ok(Vec::new()),
            },
            None => None,
        };

        let mut expenses: Vec<Expense> = self.storage.ledger.read(|data| {
            data.expenses
                .iter()
                .filter(|e| category.as_ref().map_or(true, |c| &e.category == c))
                .filter(|e| filter.start_date.map_or(true, |start| e.date >= start))
                .filter(|e| filter.end_date.map_or(true, |end| e.date <= end))
                .cloned()
                .collect()
        })?;

        expenses.sort_by(|a, b| a.chronological_cmp(b));

        if let Some(limit) = filter.limit {
            let skip = expenses.len().saturating_sub(limit);
            expenses.drain(..skip);
        }

        Ok(expenses)
    }

    /// All expenses, ordered by date ascending
    pub fn list_all(&self) -> TrackerResult<Vec<Expense>> {
        self.list(&ExpenseFilter::default())
    }
}
