//! Public API trait for the `group_authz` gateway.

use async_trait::async_trait;

use crate::decision::AccessDecision;
use crate::models::{Principal, ResourceRef};

/// Public API trait for the `group_authz` gateway.
///
/// Request handlers call this at the start of a protected operation:
///
/// ```ignore
/// let decision = authz.decide(&principal, &resource).await;
/// decision.into_result()?; // generic 403 on denial
/// ```
#[async_trait]
pub trait GroupAuthzGatewayClient: Send + Sync {
    /// Decide whether `principal` may act on `resource`.
    ///
    /// Infallible by contract: unauthenticated callers, missing or malformed
    /// policies, and collaborator failures all come back as denials.
    async fn decide(&self, principal: &Principal, resource: &ResourceRef) -> AccessDecision;
}
