//! Decision audit contract.
//!
//! An [`AuditRecord`] names who asked for what and how it ended. It never
//! carries group names: a denied principal probing access must not be able to
//! learn the shape of a policy from anything derived from the record.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::decision::{AccessDecision, DecisionReason};
use crate::models::{Principal, ResourceRef};

/// Audited outcome of one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuditOutcome {
    Granted,
    NotAuthorized { missing_count: usize },
    Unauthenticated,
    MalformedPolicy,
    CollaboratorUnavailable,
}

impl From<&DecisionReason> for AuditOutcome {
    fn from(reason: &DecisionReason) -> Self {
        match reason {
            DecisionReason::Satisfied => Self::Granted,
            DecisionReason::MissingGroups(groups) => Self::NotAuthorized {
                missing_count: groups.len(),
            },
            DecisionReason::InvalidInput => Self::MalformedPolicy,
            DecisionReason::Unauthenticated => Self::Unauthenticated,
            DecisionReason::CollaboratorUnavailable => Self::CollaboratorUnavailable,
        }
    }
}

/// One audit entry per decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub decision_id: Uuid,
    pub principal_id: Option<Uuid>,
    pub resource: ResourceRef,
    pub granted: bool,
    #[serde(flatten)]
    pub outcome: AuditOutcome,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl AuditRecord {
    /// Record `decision` as taken now.
    #[must_use]
    pub fn new(principal: &Principal, resource: &ResourceRef, decision: &AccessDecision) -> Self {
        Self {
            decision_id: Uuid::new_v4(),
            principal_id: principal.verified_subject_id(),
            resource: resource.clone(),
            granted: decision.is_granted(),
            outcome: AuditOutcome::from(decision.reason()),
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// Destination for audit records.
///
/// Implementations must not fail the decision: an audit sink that cannot
/// persist a record reports that on its own channel.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord);
}
