//! Collaborator traits implemented by claim-source and policy-store plugins.

use async_trait::async_trait;
use uuid::Uuid;

use crate::claims::Claim;
use crate::error::{ClaimSourceError, PolicyStoreError};
use crate::models::ResourceRef;
use crate::policy::PolicyDefinition;

/// Trusted source of a principal's current, verified claims
/// (token introspection, session store).
#[async_trait]
pub trait ClaimSourceClient: Send + Sync {
    /// Current claims of an authenticated principal.
    ///
    /// A principal unknown to the source holds no claims.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the source cannot answer
    /// - `Internal` for unexpected errors
    async fn groups_for_principal(&self, subject_id: Uuid) -> Result<Vec<Claim>, ClaimSourceError>;
}

/// Resource policy metadata store.
#[async_trait]
pub trait PolicyStoreClient: Send + Sync {
    /// Policy declared for `resource`.
    ///
    /// # Errors
    ///
    /// - `ResourceNotFound` if no policy is declared
    /// - `Unavailable` if the store cannot answer
    /// - `Internal` for unexpected errors
    async fn policy_for_resource(
        &self,
        resource: &ResourceRef,
    ) -> Result<PolicyDefinition, PolicyStoreError>;
}
