//! Configuration for the Group AuthZ gateway.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment prefix for overrides, e.g. `GROUP_AUTHZ__FETCH_TIMEOUT_MS=500`.
pub const ENV_PREFIX: &str = "GROUP_AUTHZ__";

/// Gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupAuthzGwConfig {
    /// Upper bound for each claim-source and policy-store call.
    /// A call that does not finish in time is a denial.
    pub fetch_timeout_ms: u64,

    /// Decision audit settings.
    pub audit: AuditConfig,
}

impl Default for GroupAuthzGwConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 2000,
            audit: AuditConfig::default(),
        }
    }
}

impl GroupAuthzGwConfig {
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Load configuration: defaults, then the YAML file, then environment.
    ///
    /// A missing file leaves the defaults in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment override does not
    /// match the configuration schema.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let cfg = Figment::from(Serialized::defaults(Self::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(cfg)
    }
}

/// Audit configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Emit an audit record for every decision.
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = GroupAuthzGwConfig::default();
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(2));
        assert!(cfg.audit.enabled);
    }

    #[test]
    fn yaml_defaults_are_applied() {
        let cfg: GroupAuthzGwConfig = serde_saphyr::from_str("fetch_timeout_ms: 250\n").unwrap();
        assert_eq!(cfg.fetch_timeout_ms, 250);
        assert!(cfg.audit.enabled);
    }

    #[test]
    fn yaml_rejects_unknown_fields() {
        let yaml = r#"
fetch_timeout_ms: 500
cache_decisions: true
"#;
        let parsed: Result<GroupAuthzGwConfig, _> = serde_saphyr::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn yaml_rejects_vendor_selector() {
        let parsed: Result<GroupAuthzGwConfig, _> =
            serde_saphyr::from_str("vendor: \"acme\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn load_layers_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "group_authz.yaml",
                r#"
fetch_timeout_ms: 750
audit:
  enabled: true
"#,
            )?;
            jail.set_env("GROUP_AUTHZ__AUDIT__ENABLED", "false");

            let cfg = GroupAuthzGwConfig::load("group_authz.yaml").map_err(|e| e.to_string())?;
            assert_eq!(cfg.fetch_timeout_ms, 750);
            assert!(!cfg.audit.enabled);
            Ok(())
        });
    }

    #[test]
    fn load_without_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let cfg = GroupAuthzGwConfig::load("absent.yaml").map_err(|e| e.to_string())?;
            assert_eq!(cfg.fetch_timeout_ms, 2000);
            Ok(())
        });
    }
}
