//! Strongly-typed expense identifiers
//!
//! Wrapping the UUID keeps expense ids from being mixed up with other
//! strings and gives them a short display form for the terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix used in the short display form of an expense id
pub const EXPENSE_ID_PREFIX: &str = "exp-";

/// Unique identifier of an expense, assigned on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Check whether `fragment` identifies this id
    ///
    /// Matches the full UUID, the display form ("exp-1a2b3c4d") or any
    /// prefix of the hyphenated UUID, case-insensitively.
    pub fn matches_prefix(&self, fragment: &str) -> bool {
        let lowered = fragment.trim().to_ascii_lowercase();
        let fragment = lowered
            .strip_prefix(EXPENSE_ID_PREFIX)
            .unwrap_or(lowered.as_str());
        !fragment.is_empty() && self.0.to_string().starts_with(fragment)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", EXPENSE_ID_PREFIX, &self.0.to_string()[..8])
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    /// Parse a full UUID, with or without the display prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(EXPENSE_ID_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
