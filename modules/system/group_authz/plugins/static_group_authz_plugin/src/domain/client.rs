//! Collaborator client implementations for the static Group AuthZ plugin.

use async_trait::async_trait;
use group_authz_sdk::{
    Claim, ClaimSourceClient, ClaimSourceError, PolicyDefinition, PolicyStoreClient,
    PolicyStoreError, ResourceRef,
};
use uuid::Uuid;

use super::service::Service;

#[async_trait]
impl ClaimSourceClient for Service {
    async fn groups_for_principal(&self, subject_id: Uuid) -> Result<Vec<Claim>, ClaimSourceError> {
        Ok(self.claims_for(subject_id))
    }
}

#[async_trait]
impl PolicyStoreClient for Service {
    async fn policy_for_resource(
        &self,
        resource: &ResourceRef,
    ) -> Result<PolicyDefinition, PolicyStoreError> {
        self.policy_for(resource)
            .cloned()
            .ok_or_else(|| PolicyStoreError::ResourceNotFound(resource.to_string()))
    }
}
