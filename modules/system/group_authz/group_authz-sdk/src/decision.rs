//! Authorization decisions and their transport-boundary mapping.
//!
//! A decision's [`DecisionReason`] is for operators only. Callers facing the
//! principal must go through [`AccessDecision::into_result`], whose
//! [`AccessDenied`] error carries nothing but a generic message.

use std::fmt;

use serde::Serialize;

use crate::error::PolicyError;

/// Why a decision came out the way it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "groups", rename_all = "snake_case")]
pub enum DecisionReason {
    /// The policy is satisfied (or requires nothing).
    Satisfied,
    /// Required groups the principal does not hold, in sorted order.
    MissingGroups(Vec<String>),
    /// The policy is absent or malformed.
    InvalidInput,
    /// The principal has no verified identity.
    Unauthenticated,
    /// The claim source or policy store failed to answer in time.
    CollaboratorUnavailable,
}

/// Operator-facing classification of a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialCategory {
    Unauthenticated,
    /// Configuration-integrity alert: should never happen with sound metadata.
    MalformedPolicy,
    /// Ordinary insufficient-groups outcome.
    NotAuthorized,
    /// Dependency outage, as opposed to someone probing access.
    CollaboratorUnavailable,
}

impl DenialCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::MalformedPolicy => "malformed_policy",
            Self::NotAuthorized => "not_authorized",
            Self::CollaboratorUnavailable => "collaborator_unavailable",
        }
    }
}

impl DecisionReason {
    /// Denial category, or `None` for [`DecisionReason::Satisfied`].
    #[must_use]
    pub fn category(&self) -> Option<DenialCategory> {
        match self {
            Self::Satisfied => None,
            Self::MissingGroups(_) => Some(DenialCategory::NotAuthorized),
            Self::InvalidInput => Some(DenialCategory::MalformedPolicy),
            Self::Unauthenticated => Some(DenialCategory::Unauthenticated),
            Self::CollaboratorUnavailable => Some(DenialCategory::CollaboratorUnavailable),
        }
    }
}

/// Outcome of one authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    granted: bool,
    reason: DecisionReason,
}

impl AccessDecision {
    #[must_use]
    pub fn granted() -> Self {
        Self {
            granted: true,
            reason: DecisionReason::Satisfied,
        }
    }

    /// Denial listing the missing groups.
    #[must_use]
    pub fn missing_groups(missing: Vec<String>) -> Self {
        Self::denied(DecisionReason::MissingGroups(missing))
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::denied(DecisionReason::Unauthenticated)
    }

    #[must_use]
    pub fn invalid_input() -> Self {
        Self::denied(DecisionReason::InvalidInput)
    }

    #[must_use]
    pub fn collaborator_unavailable() -> Self {
        Self::denied(DecisionReason::CollaboratorUnavailable)
    }

    /// Malformed policy input always resolves to denial.
    #[must_use]
    pub fn from_policy_error(_err: &PolicyError) -> Self {
        Self::invalid_input()
    }

    fn denied(reason: DecisionReason) -> Self {
        debug_assert!(reason != DecisionReason::Satisfied);
        Self {
            granted: false,
            reason,
        }
    }

    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.granted
    }

    #[must_use]
    pub fn reason(&self) -> &DecisionReason {
        &self.reason
    }

    /// Missing groups of a `NotAuthorized` denial; empty otherwise.
    #[must_use]
    pub fn missing(&self) -> &[String] {
        match &self.reason {
            DecisionReason::MissingGroups(groups) => groups,
            _ => &[],
        }
    }

    /// Map to the transport boundary.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when access is not granted.
    pub fn into_result(self) -> Result<(), AccessDenied> {
        if self.granted { Ok(()) } else { Err(AccessDenied) }
    }
}

/// Client-facing denial. Deliberately opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied;

impl AccessDenied {
    /// HTTP status a transport layer should answer with.
    pub const STATUS_CODE: u16 = 403;
    pub const MESSAGE: &'static str = "access denied";
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MESSAGE)
    }
}

impl std::error::Error for AccessDenied {}
