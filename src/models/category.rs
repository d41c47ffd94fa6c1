//! Category label normalization
//!
//! Categories are open, user-defined strings. They are normalized once, when
//! a record enters the store, so aggregation can group them verbatim.

use std::fmt;

/// Maximum length of a category label, in characters
pub const MAX_CATEGORY_LEN: usize = 64;

/// How category labels are normalized at ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryPolicy {
    /// Lowercase labels so grouping ignores case
    pub fold_case: bool,
}

impl CategoryPolicy {
    pub fn case_sensitive() -> Self {
        Self { fold_case: false }
    }

    pub fn case_insensitive() -> Self {
        Self { fold_case: true }
    }

    /// Normalize a raw label
    ///
    /// Trims surrounding whitespace, collapses interior whitespace runs to a
    /// single space and, when `fold_case` is set, lowercases the result.
    pub fn normalize(&self, raw: &str) -> Result<String, CategoryError> {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.is_empty() {
            return Err(CategoryError::Empty);
        }
        if collapsed.chars().count() > MAX_CATEGORY_LEN {
            return Err(CategoryError::TooLong(collapsed.chars().count()));
        }

        Ok(if self.fold_case {
            collapsed.to_lowercase()
        } else {
            collapsed
        })
    }
}

/// Validation errors for category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    Empty,
    TooLong(usize),
}

impl fmt::Display for CategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryError::Empty => write!(f, "Category cannot be empty"),
            CategoryError::TooLong(len) => write!(
                f,
                "Category is {} characters long (maximum {})",
                len, MAX_CATEGORY_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryError {}
