//! Audit log for the expense tracker
//!
//! Every create, update and delete of an expense or budget is appended to a
//! line-delimited JSON log, with before/after values where they exist.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends entries to and reads them back from the log file
//! - `generate_diff`: field-level summary of what an update changed

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
