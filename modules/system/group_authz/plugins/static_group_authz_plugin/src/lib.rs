//! Static Group AuthZ plugin.
//!
//! Serves principal group memberships and resource policies from YAML
//! configuration, for development and testing.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::StaticGroupAuthzPluginConfig;
pub use domain::Service;
pub use module::StaticGroupAuthzPlugin;
