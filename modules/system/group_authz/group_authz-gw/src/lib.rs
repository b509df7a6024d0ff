//! Group AuthZ Gateway Module
//!
//! This module resolves a principal's current group claims and a resource's
//! declared policy through collaborator clients, runs the policy evaluator,
//! and records an audit entry for every decision.
//!
//! The gateway provides the `GroupAuthzGatewayClient` trait for consumption
//! by request-handling code. Every failure path resolves to denial.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::GroupAuthzGwConfig;
pub use domain::{GroupAuthzGwLocalClient, InMemoryAuditSink, Service, TracingAuditSink};
pub use module::{GatewayDeps, GroupAuthzGateway};
