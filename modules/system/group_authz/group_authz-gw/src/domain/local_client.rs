//! Local (in-process) client for the Group AuthZ gateway.

use std::sync::Arc;

use async_trait::async_trait;
use group_authz_sdk::{AccessDecision, GroupAuthzGatewayClient, Principal, ResourceRef};

use super::Service;

/// Local client wrapping the gateway service.
pub struct GroupAuthzGwLocalClient {
    svc: Arc<Service>,
}

impl GroupAuthzGwLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

#[async_trait]
impl GroupAuthzGatewayClient for GroupAuthzGwLocalClient {
    async fn decide(&self, principal: &Principal, resource: &ResourceRef) -> AccessDecision {
        self.svc.decide(principal, resource).await
    }
}
