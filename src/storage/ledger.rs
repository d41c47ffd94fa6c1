//! Ledger repository for JSON storage
//!
//! Holds every expense and budget in one `ledger.json` file. Mutations are
//! applied to a copy, written to disk, and only then made visible.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Expense, ExpenseId, OverallBudget, Period};

use super::file_io::{read_json, write_json_atomic};

/// Current on-disk schema version
pub const LEDGER_SCHEMA_VERSION: u32 = 1;

/// Contents of the ledger file, also used as a read-only snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub budgets: Vec<Budget>,

    #[serde(default)]
    pub overall_budgets: Vec<OverallBudget>,
}

fn default_schema_version() -> u32 {
    LEDGER_SCHEMA_VERSION
}

impl Default for LedgerData {
    fn default() -> Self {
        Self {
            schema_version: LEDGER_SCHEMA_VERSION,
            expenses: Vec::new(),
            budgets: Vec::new(),
            overall_budgets: Vec::new(),
        }
    }
}

impl LedgerData {
    pub fn contains_expense(&self, id: ExpenseId) -> bool {
        self.expenses.iter().any(|e| e.id == id)
    }

    pub fn budgets_for(&self, period: Period) -> Vec<Budget> {
        self.budgets
            .iter()
            .filter(|b| b.period == period)
            .cloned()
            .collect()
    }

    pub fn overall_budget_for(&self, period: Period) -> Option<&OverallBudget> {
        self.overall_budgets.iter().find(|b| b.period == period)
    }

    /// Check the invariants a hand-edited or corrupted file could break
    fn check_integrity(&self) -> Result<(), String> {
        if self.schema_version > LEDGER_SCHEMA_VERSION {
            return Err(format!(
                "unsupported schema version {} (newest known is {})",
                self.schema_version, LEDGER_SCHEMA_VERSION
            ));
        }

        let mut ids = HashSet::new();
        for expense in &self.expenses {
            if !ids.insert(expense.id) {
                return Err(format!("duplicate expense id {}", expense.id));
            }
            expense
                .validate()
                .map_err(|e| format!("expense {}: {}", expense.id, e))?;
        }

        let mut keys = HashSet::new();
        for budget in &self.budgets {
            if !keys.insert((budget.category.as_str(), budget.period)) {
                return Err(format!("duplicate budget {}", budget.key()));
            }
            budget
                .validate()
                .map_err(|e| format!("budget {}: {}", budget.key(), e))?;
        }

        let mut periods = HashSet::new();
        for overall in &self.overall_budgets {
            if !periods.insert(overall.period) {
                return Err(format!("duplicate overall budget {}", overall.period));
            }
            overall
                .validate()
                .map_err(|e| format!("overall budget {}: {}", overall.period, e))?;
        }

        Ok(())
    }

    /// Put records into the order they are written in
    fn sort(&mut self) {
        self.expenses.sort_by(|a, b| a.chronological_cmp(b));
        self.budgets
            .sort_by(|a, b| a.period.cmp(&b.period).then(a.category.cmp(&b.category)));
        self.overall_budgets.sort_by(|a, b| a.period.cmp(&b.period));
    }
}

/// Repository for ledger persistence
pub struct LedgerRepository {
    path: PathBuf,
    data: RwLock<LedgerData>,
}

impl LedgerRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(LedgerData::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger from disk, replacing the in-memory state
    ///
    /// A missing file loads as an empty ledger.
    pub fn load(&self) -> TrackerResult<()> {
        let mut file_data: LedgerData = read_json(&self.path)?;
        file_data.check_integrity().map_err(|e| {
            TrackerError::Storage(format!("Invalid ledger {}: {}", self.path.display(), e))
        })?;
        file_data.sort();

        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        tracing::debug!(
            expenses = file_data.expenses.len(),
            budgets = file_data.budgets.len(),
            "loaded ledger"
        );
        *data = file_data;
        Ok(())
    }

    /// Write the current state to disk
    pub fn save(&self) -> TrackerResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Apply a mutation and persist it as one unit
    ///
    /// `apply` runs against a copy of the ledger. The copy replaces the live
    /// state only after it has been written to disk, so an error from either
    /// `apply` or the write leaves the repository unchanged. The write lock
    /// is held throughout, so persistence writes never interleave.
    pub fn transact<R, F>(&self, apply: F) -> TrackerResult<R>
    where
        F: FnOnce(&mut LedgerData) -> TrackerResult<R>,
    {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut draft = data.clone();
        let result = apply(&mut draft)?;
        draft.sort();

        write_json_atomic(&self.path, &draft)?;
        *data = draft;

        Ok(result)
    }

    /// Read-only access to the current state
    pub fn read<R, F>(&self, view: F) -> TrackerResult<R>
    where
        F: FnOnce(&LedgerData) -> R,
    {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(view(&data))
    }

    /// A copy of the whole ledger
    pub fn snapshot(&self) -> TrackerResult<LedgerData> {
        self.read(|data| data.clone())
    }

    pub fn expense_count(&self) -> TrackerResult<usize> {
        self.read(|data| data.expenses.len())
    }
}
