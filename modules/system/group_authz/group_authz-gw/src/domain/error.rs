//! Domain errors for the Group AuthZ gateway.
//!
//! These stay internal: every variant resolves to the same client-facing
//! denial, while logs keep the distinction for operators.

use group_authz_sdk::{
    AccessDecision, ClaimSourceError, DenialCategory, PolicyError, PolicyStoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("principal is not authenticated")]
    Unauthenticated,

    #[error("claim source failed: {0}")]
    ClaimSource(#[from] ClaimSourceError),

    #[error("claim source timed out")]
    ClaimSourceTimeout,

    #[error("no policy declared for resource {0}")]
    PolicyNotFound(String),

    #[error("policy store failed: {0}")]
    PolicyStore(PolicyStoreError),

    #[error("policy store timed out")]
    PolicyStoreTimeout,

    #[error("malformed policy: {0}")]
    MalformedPolicy(#[from] PolicyError),
}

impl From<PolicyStoreError> for DomainError {
    fn from(e: PolicyStoreError) -> Self {
        match e {
            PolicyStoreError::ResourceNotFound(resource) => Self::PolicyNotFound(resource),
            other => Self::PolicyStore(other),
        }
    }
}

impl DomainError {
    #[must_use]
    pub fn category(&self) -> DenialCategory {
        match self {
            Self::Unauthenticated => DenialCategory::Unauthenticated,
            Self::ClaimSource(_)
            | Self::ClaimSourceTimeout
            | Self::PolicyStore(_)
            | Self::PolicyStoreTimeout => DenialCategory::CollaboratorUnavailable,
            Self::PolicyNotFound(_) | Self::MalformedPolicy(_) => DenialCategory::MalformedPolicy,
        }
    }

    /// The fail-closed decision for this error.
    #[must_use]
    pub fn to_decision(&self) -> AccessDecision {
        match self {
            Self::Unauthenticated => AccessDecision::unauthenticated(),
            Self::ClaimSource(_)
            | Self::ClaimSourceTimeout
            | Self::PolicyStore(_)
            | Self::PolicyStoreTimeout => AccessDecision::collaborator_unavailable(),
            Self::PolicyNotFound(_) | Self::MalformedPolicy(_) => AccessDecision::invalid_input(),
        }
    }
}
