//! Budget service
//!
//! Upserts, deletes and lists per-category budgets and overall monthly
//! budgets, with validation and audit logging.

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Money, OverallBudget, Period};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn normalize_category(&self, raw: &str) -> TrackerResult<String> {
        self.storage
            .category_policy()
            .normalize(raw)
            .map_err(|e| TrackerError::Validation(e.to_string()))
    }

    /// Set the limit for a category in a period, replacing any existing one
    pub fn upsert(&self, category: &str, period: Period, limit: Money) -> TrackerResult<Budget> {
        let budget = Budget::new(self.normalize_category(category)?, period, limit);
        budget
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let previous = self.storage.ledger.transact(|data| {
            let previous = data
                .budgets
                .iter()
                .position(|b| b.is_for(&budget.category, period))
                .map(|index| data.budgets.remove(index));
            data.budgets.push(budget.clone());
            Ok(previous)
        })?;

        match previous {
            Some(before) => self.storage.log_update(
                EntityType::Budget,
                budget.key(),
                None,
                &before,
                &budget,
            ),
            None => self
                .storage
                .log_create(EntityType::Budget, budget.key(), None, &budget),
        }

        Ok(budget)
    }

    /// Delete the budget for a category in a period
    pub fn delete(&self, category: &str, period: Period) -> TrackerResult<Budget> {
        let category = self.normalize_category(category)?;

        let removed = self.storage.ledger.transact(|data| {
            let index = data
                .budgets
                .iter()
                .position(|b| b.is_for(&category, period))
                .ok_or_else(|| TrackerError::budget_not_found(format!("{} {}", category, period)))?;
            Ok(data.budgets.remove(index))
        })?;

        self.storage
            .log_delete(EntityType::Budget, removed.key(), None, &removed);
        Ok(removed)
    }

    pub fn get(&self, category: &str, period: Period) -> TrackerResult<Option<Budget>> {
        let category = self.normalize_category(category)?;
        self.storage.ledger.read(|data| {
            data.budgets
                .iter()
                .find(|b| b.is_for(&category, period))
                .cloned()
        })
    }

    /// List budgets, optionally only those for one period
    ///
    /// Ordered by period, then category.
    pub fn list(&self, period: Option<Period>) -> TrackerResult<Vec<Budget>> {
        self.storage.ledger.read(|data| match period {
            Some(period) => data.budgets_for(period),
            None => data.budgets.clone(),
        })
    }

    /// Set the overall limit across all categories for a period
    pub fn upsert_overall(&self, period: Period, limit: Money) -> TrackerResult<OverallBudget> {
        let overall = OverallBudget::new(period, limit);
        overall
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let previous = self.storage.ledger.transact(|data| {
            let previous = data
                .overall_budgets
                .iter()
                .position(|b| b.period == period)
                .map(|index| data.overall_budgets.remove(index));
            data.overall_budgets.push(overall.clone());
            Ok(previous)
        })?;

        let key = period.to_string();
        match previous {
            Some(before) => self.storage.log_update(
                EntityType::OverallBudget,
                key,
                None,
                &before,
                &overall,
            ),
            None => self
                .storage
                .log_create(EntityType::OverallBudget, key, None, &overall),
        }

        Ok(overall)
    }

    pub fn delete_overall(&self, period: Period) -> TrackerResult<OverallBudget> {
        let removed = self.storage.ledger.transact(|data| {
            let index = data
                .overall_budgets
                .iter()
                .position(|b| b.period == period)
                .ok_or_else(|| TrackerError::overall_budget_not_found(period.to_string()))?;
            Ok(data.overall_budgets.remove(index))
        })?;

        self.storage.log_delete(
            EntityType::OverallBudget,
            removed.period.to_string(),
            None,
            &removed,
        );
        Ok(removed)
    }

    pub fn get_overall(&self, period: Period) -> TrackerResult<Option<OverallBudget>> {
        self.storage
            .ledger
            .read(|data| data.overall_budget_for(period).cloned())
    }

    pub fn list_overall(&self) -> TrackerResult<Vec<OverallBudget>> {
        self.storage.ledger.read(|data| data.overall_budgets.clone())
    }
}
