//! Audit sinks shipped with the gateway.

use std::sync::{Mutex, PoisonError};

use group_authz_sdk::{AuditRecord, AuditSink};

/// Emits audit records as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord) {
        tracing::info!(
            audit = true,
            decision_id = %record.decision_id,
            principal_id = ?record.principal_id,
            resource = %record.resource,
            granted = record.granted,
            outcome = ?record.outcome,
            timestamp = %record.timestamp,
            "authorization decision"
        );
    }
}

/// Keeps audit records in memory.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl InMemoryAuditSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded entries, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, record: &AuditRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}
