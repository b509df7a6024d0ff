//! Group AuthZ gateway module.

use std::sync::{Arc, OnceLock};

use group_authz_sdk::{AuditSink, ClaimSourceClient, GroupAuthzGatewayClient, PolicyStoreClient};
use tracing::info;

use crate::config::GroupAuthzGwConfig;
use crate::domain::{GroupAuthzGwLocalClient, Service, TracingAuditSink};

/// Collaborators the gateway is wired with.
pub struct GatewayDeps {
    pub claim_source: Arc<dyn ClaimSourceClient>,
    pub policy_store: Arc<dyn PolicyStoreClient>,
    /// Overrides the configured audit sink. `None` falls back to
    /// [`TracingAuditSink`] when auditing is enabled.
    pub audit_sink: Option<Arc<dyn AuditSink>>,
}

impl GatewayDeps {
    #[must_use]
    pub fn new(
        claim_source: Arc<dyn ClaimSourceClient>,
        policy_store: Arc<dyn PolicyStoreClient>,
    ) -> Self {
        Self {
            claim_source,
            policy_store,
            audit_sink: None,
        }
    }

    #[must_use]
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }
}

/// Group AuthZ Gateway module.
///
/// This module:
/// 1. Validates gateway configuration
/// 2. Wires the claim source, policy store and audit sink into the service
/// 3. Hands out the [`GroupAuthzGatewayClient`] used by request handlers
pub struct GroupAuthzGateway {
    service: OnceLock<Arc<Service>>,
}

impl Default for GroupAuthzGateway {
    fn default() -> Self {
        Self {
            service: OnceLock::new(),
        }
    }
}

impl GroupAuthzGateway {
    pub const MODULE_NAME: &'static str = "group_authz";

    /// Initialize the gateway and return its public client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable or the module
    /// has already been initialized.
    #[tracing::instrument(skip_all, fields(fetch_timeout_ms = cfg.fetch_timeout_ms))]
    pub fn init(
        &self,
        cfg: &GroupAuthzGwConfig,
        deps: GatewayDeps,
    ) -> anyhow::Result<Arc<dyn GroupAuthzGatewayClient>> {
        info!("Initializing {} gateway", Self::MODULE_NAME);

        if cfg.fetch_timeout_ms == 0 {
            anyhow::bail!("fetch_timeout_ms must be greater than zero");
        }

        let mut svc = Service::new(deps.claim_source, deps.policy_store, cfg.fetch_timeout());
        let sink = match deps.audit_sink {
            Some(sink) => Some(sink),
            None if cfg.audit.enabled => Some(Arc::new(TracingAuditSink) as Arc<dyn AuditSink>),
            None => None,
        };
        if let Some(sink) = sink {
            svc = svc.with_audit_sink(sink);
        }
        let svc = Arc::new(svc);

        self.service
            .set(svc.clone())
            .map_err(|_| anyhow::anyhow!("{} module already initialized", Self::MODULE_NAME))?;

        info!(
            fetch_timeout_ms = cfg.fetch_timeout_ms,
            audit = cfg.audit.enabled,
            "{} gateway initialized",
            Self::MODULE_NAME
        );
        Ok(Arc::new(GroupAuthzGwLocalClient::new(svc)))
    }

    /// The wired service, once [`Self::init`] has run.
    #[must_use]
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.get().cloned()
    }
}
