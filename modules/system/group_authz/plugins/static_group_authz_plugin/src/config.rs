//! Configuration for the static Group AuthZ plugin.

use serde::Deserialize;
use uuid::Uuid;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticGroupAuthzPluginConfig {
    /// Group memberships per principal.
    pub principals: Vec<PrincipalGroupsConfig>,

    /// Declared resource policies.
    pub policies: Vec<ResourcePolicyConfig>,
}

/// Groups held by one principal.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrincipalGroupsConfig {
    pub subject_id: Uuid,

    #[serde(default)]
    pub groups: Vec<String>,
}

/// Policy declared for a resource type, optionally narrowed to one action.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourcePolicyConfig {
    pub resource_type: String,

    /// `None` applies to every action without its own entry.
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub required_groups: Vec<String>,

    /// `all` or `any`. Kept verbatim; validated at decision time.
    pub mode: String,
}
