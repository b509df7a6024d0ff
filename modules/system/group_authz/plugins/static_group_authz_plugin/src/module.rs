use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::config::StaticGroupAuthzPluginConfig;
use crate::domain::Service;

/// Static Group AuthZ plugin module.
///
/// Serves pre-configured group memberships and resource policies from YAML
/// configuration for development and testing. The returned service is both
/// the claim source and the policy store for the gateway.
pub struct StaticGroupAuthzPlugin {
    service: OnceLock<Arc<Service>>,
}

impl Default for StaticGroupAuthzPlugin {
    fn default() -> Self {
        Self {
            service: OnceLock::new(),
        }
    }
}

impl StaticGroupAuthzPlugin {
    pub const MODULE_NAME: &'static str = "static-group-authz-plugin";

    /// Build the plugin service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent or the module
    /// has already been initialized.
    pub fn init(&self, cfg: &StaticGroupAuthzPluginConfig) -> anyhow::Result<Arc<Service>> {
        info!("Initializing {} module", Self::MODULE_NAME);

        info!(
            principal_count = cfg.principals.len(),
            policy_count = cfg.policies.len(),
            "Loaded plugin configuration"
        );

        let service = Arc::new(Service::from_config(cfg)?);
        self.service
            .set(service.clone())
            .map_err(|_| anyhow::anyhow!("{} module already initialized", Self::MODULE_NAME))?;

        info!("{} module initialized successfully", Self::MODULE_NAME);
        Ok(service)
    }
}
