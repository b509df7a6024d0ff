//! Service implementation for the static Group AuthZ plugin.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use group_authz_sdk::{Claim, PolicyDefinition, PolicyMode, ResourceRef};
use uuid::Uuid;

use crate::config::StaticGroupAuthzPluginConfig;

type PolicyKey = (String, Option<String>);

/// Static Group AuthZ service.
///
/// - Principals map to the group claims listed for them; unknown principals
///   hold no groups.
/// - Policies are looked up by `(resource_type, action)`, falling back to the
///   entry without an action.
pub struct Service {
    groups: HashMap<Uuid, Vec<String>>,
    policies: HashMap<PolicyKey, PolicyDefinition>,
}

impl Service {
    /// Create a service from plugin configuration.
    ///
    /// Repeated principal entries are merged.
    ///
    /// # Errors
    ///
    /// Returns an error if two policies are declared for the same resource
    /// type and action.
    pub fn from_config(cfg: &StaticGroupAuthzPluginConfig) -> anyhow::Result<Self> {
        let mut groups: HashMap<Uuid, Vec<String>> = HashMap::new();
        for p in &cfg.principals {
            groups
                .entry(p.subject_id)
                .or_default()
                .extend(p.groups.iter().cloned());
        }

        let mut policies = HashMap::with_capacity(cfg.policies.len());
        for p in &cfg.policies {
            if p.mode.parse::<PolicyMode>().is_err() {
                // Kept so that the gateway denies at decision time.
                tracing::warn!(
                    resource_type = %p.resource_type,
                    action = ?p.action,
                    mode = %p.mode,
                    "policy has an unrecognized mode; every request for it will be denied"
                );
            }

            let key = (p.resource_type.clone(), p.action.clone());
            match policies.entry(key) {
                Entry::Occupied(_) => anyhow::bail!(
                    "duplicate policy for resource type '{}' (action: {:?})",
                    p.resource_type,
                    p.action
                ),
                Entry::Vacant(slot) => {
                    slot.insert(PolicyDefinition {
                        required_groups: p.required_groups.clone(),
                        mode: p.mode.clone(),
                    });
                }
            }
        }

        Ok(Self { groups, policies })
    }

    /// Group claims configured for a principal.
    #[must_use]
    pub fn claims_for(&self, subject_id: Uuid) -> Vec<Claim> {
        self.groups
            .get(&subject_id)
            .map(|groups| groups.iter().map(Claim::group).collect())
            .unwrap_or_default()
    }

    /// Policy declared for a resource, if any.
    #[must_use]
    pub fn policy_for(&self, resource: &ResourceRef) -> Option<&PolicyDefinition> {
        let key = |action: Option<&String>| (resource.resource_type.clone(), action.cloned());
        resource
            .action
            .as_ref()
            .and_then(|action| self.policies.get(&key(Some(action))))
            .or_else(|| self.policies.get(&key(None)))
    }

    #[must_use]
    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }

    #[must_use]
    pub fn principal_count(&self) -> usize {
        self.groups.len()
    }
}
