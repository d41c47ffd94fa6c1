//! Expense Tracker - personal expense tracking with monthly budgets
//!
//! This library provides the core of the `expense` command-line tool: a
//! record store of expenses and budgets persisted to a JSON file, and pure
//! aggregation over snapshots of that store.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, budgets, money, periods)
//! - `storage`: JSON file storage layer
//! - `services`: Validated mutations and queries over the store
//! - `reports`: Category/month totals, budget status and alerts
//! - `audit`: Audit logging system
//! - `display`, `export`, `cli`: terminal output and command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_tracker::config::{Settings, TrackerPaths};
//! use expense_tracker::storage::Storage;
//!
//! # fn main() -> Result<(), expense_tracker::TrackerError> {
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?.with_category_policy(settings.category_policy());
//! storage.load_all()?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
