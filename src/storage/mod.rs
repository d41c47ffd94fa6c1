//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes, the append-only audit log,
//! and automatic directory creation.

pub mod file_io;
pub mod ledger;

pub use file_io::{read_json, write_json_atomic};
pub use ledger::{LedgerData, LedgerRepository};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::CategoryPolicy;

/// Main storage coordinator: owns the ledger and the audit log
pub struct Storage {
    paths: TrackerPaths,
    pub ledger: LedgerRepository,
    audit: AuditLogger,
    category_policy: CategoryPolicy,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.ledger_file()),
            audit: AuditLogger::new(paths.audit_log()),
            category_policy: CategoryPolicy::default(),
            paths,
        })
    }

    /// Use a different category normalization policy for new records
    pub fn with_category_policy(mut self, policy: CategoryPolicy) -> Self {
        self.category_policy = policy;
        self
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    pub fn category_policy(&self) -> CategoryPolicy {
        self.category_policy
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TrackerError> {
        self.ledger.load()
    }

    /// Log a create operation to the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity));
    }

    /// Log an update operation to the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        self.write_audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ));
    }

    /// Log a delete operation to the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity));
    }

    // The ledger change is already on disk by the time we get here, so a
    // failed audit write is reported but does not fail the operation.
    fn write_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            tracing::warn!(
                error = %e,
                operation = %entry.operation,
                entity = %entry.entity_id,
                "failed to write audit entry"
            );
        }
    }
}
