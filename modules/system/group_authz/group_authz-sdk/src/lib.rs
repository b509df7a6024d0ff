//! Group AuthZ SDK
//!
//! This crate provides the public API for the `group_authz` module:
//!
//! - [`ClaimSet`], [`Claim`], [`GroupName`] - Normalized group memberships of a principal
//! - [`AccessPolicy`], [`PolicyDefinition`], [`PolicyMode`] - Resource group requirements
//! - [`PolicyEvaluator`] - Pure decision procedure (claims x policy -> decision)
//! - [`AccessDecision`], [`DecisionReason`] - Decision models
//! - [`GroupAuthzGatewayClient`] - Public API trait for request handlers
//! - [`ClaimSourceClient`], [`PolicyStoreClient`] - Collaborator traits
//! - [`AuditRecord`], [`AuditSink`] - Decision audit contract
//!
//! ## Usage
//!
//! ```ignore
//! use group_authz_sdk::{GroupAuthzGatewayClient, Principal, ResourceRef};
//!
//! let decision = authz
//!     .decide(&Principal::authenticated(user_id), &ResourceRef::new("reports.audit"))
//!     .await;
//!
//! // Maps to a generic 403 without leaking why.
//! decision.into_result()?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod audit;
pub mod claims;
pub mod decision;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod plugin_api;
pub mod policy;

// Re-export main types at crate root
pub use api::GroupAuthzGatewayClient;
pub use audit::{AuditOutcome, AuditRecord, AuditSink};
pub use claims::{Claim, ClaimSet, GroupName};
pub use decision::{AccessDecision, AccessDenied, DecisionReason, DenialCategory};
pub use error::{ClaimSourceError, PolicyError, PolicyStoreError};
pub use evaluator::{PolicyEvaluator, evaluate};
pub use models::{Principal, ResourceRef};
pub use plugin_api::{ClaimSourceClient, PolicyStoreClient};
pub use policy::{AccessPolicy, PolicyDefinition, PolicyMode};
