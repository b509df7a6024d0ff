//! Gateway service: the authorization decision pipeline.
//!
//! ```text
//! decide(principal, resource)
//!   ├─ anonymous? ──────────────────────────────► deny (Unauthenticated)
//!   ├─ claim source ─┐ (concurrent, each under fetch_timeout)
//!   ├─ policy store ─┘ ─ failure / timeout ─────► deny (CollaboratorUnavailable)
//!   │                  ─ not found ─────────────► deny (InvalidInput)
//!   ├─ PolicyEvaluator ─ malformed ─────────────► deny (InvalidInput)
//!   │                  ─ decision ──────────────► granted / MissingGroups
//!   └─ audit record
//! ```
//!
//! Nothing is cached between calls: claims and policies are fetched fresh
//! for every decision.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use group_authz_sdk::{
    AccessDecision, AuditRecord, AuditSink, ClaimSet, ClaimSourceClient, DenialCategory,
    PolicyDefinition, PolicyEvaluator, PolicyStoreClient, Principal, ResourceRef,
};
use uuid::Uuid;

use super::DomainError;

/// Group AuthZ gateway service.
pub struct Service {
    claim_source: Arc<dyn ClaimSourceClient>,
    policy_store: Arc<dyn PolicyStoreClient>,
    audit_sink: Option<Arc<dyn AuditSink>>,
    fetch_timeout: Duration,
}

impl Service {
    #[must_use]
    pub fn new(
        claim_source: Arc<dyn ClaimSourceClient>,
        policy_store: Arc<dyn PolicyStoreClient>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            claim_source,
            policy_store,
            audit_sink: None,
            fetch_timeout,
        }
    }

    #[must_use]
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }

    /// Decide, log, and audit. Every failure resolves to denial.
    pub async fn decide(&self, principal: &Principal, resource: &ResourceRef) -> AccessDecision {
        let decision = match self.evaluate(principal, resource).await {
            Ok(decision) => {
                log_decision(principal, resource, &decision);
                decision
            }
            Err(e) => {
                log_failure(principal, resource, &e);
                e.to_decision()
            }
        };

        if let Some(sink) = &self.audit_sink {
            sink.record(&AuditRecord::new(principal, resource, &decision));
        }

        decision
    }

    /// Run the pipeline without logging or auditing.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] for a principal without verified identity
    /// - claim-source / policy-store errors and timeouts
    /// - [`DomainError::MalformedPolicy`] for an unusable policy definition
    pub async fn evaluate(
        &self,
        principal: &Principal,
        resource: &ResourceRef,
    ) -> Result<AccessDecision, DomainError> {
        let subject_id = principal
            .verified_subject_id()
            .ok_or(DomainError::Unauthenticated)?;

        let (claims, definition) =
            tokio::try_join!(self.fetch_claims(subject_id), self.fetch_policy(resource))?;

        Ok(PolicyEvaluator::evaluate_definition(
            &claims,
            Some(&definition),
        )?)
    }

    async fn fetch_claims(&self, subject_id: Uuid) -> Result<ClaimSet, DomainError> {
        let claims = with_timeout(
            self.fetch_timeout,
            self.claim_source.groups_for_principal(subject_id),
        )
        .await
        .ok_or(DomainError::ClaimSourceTimeout)??;
        Ok(ClaimSet::from_claims(&claims))
    }

    async fn fetch_policy(&self, resource: &ResourceRef) -> Result<PolicyDefinition, DomainError> {
        let definition = with_timeout(
            self.fetch_timeout,
            self.policy_store.policy_for_resource(resource),
        )
        .await
        .ok_or(DomainError::PolicyStoreTimeout)??;
        Ok(definition)
    }
}

async fn with_timeout<F: Future>(limit: Duration, fut: F) -> Option<F::Output> {
    tokio::time::timeout(limit, fut).await.ok()
}

fn log_decision(principal: &Principal, resource: &ResourceRef, decision: &AccessDecision) {
    if decision.is_granted() {
        tracing::debug!(
            subject_id = ?principal.subject_id,
            resource = %resource,
            "access granted"
        );
    } else {
        // Group names stay out of logs; only how many were missing.
        tracing::info!(
            subject_id = ?principal.subject_id,
            resource = %resource,
            category = DenialCategory::NotAuthorized.as_str(),
            missing_count = decision.missing().len(),
            "access denied"
        );
    }
}

fn log_failure(principal: &Principal, resource: &ResourceRef, e: &DomainError) {
    let category = e.category().as_str();
    match e {
        DomainError::Unauthenticated => {
            tracing::info!(resource = %resource, category, "access denied");
        }
        DomainError::PolicyNotFound(_) | DomainError::MalformedPolicy(_) => {
            tracing::warn!(
                alert = "config_integrity",
                subject_id = ?principal.subject_id,
                resource = %resource,
                category,
                error = %e,
                "access denied: resource policy is missing or malformed"
            );
        }
        DomainError::ClaimSource(_)
        | DomainError::ClaimSourceTimeout
        | DomainError::PolicyStore(_)
        | DomainError::PolicyStoreTimeout => {
            tracing::error!(
                subject_id = ?principal.subject_id,
                resource = %resource,
                category,
                error = %e,
                "access denied: authorization dependency unavailable"
            );
        }
    }
}
