//! Principal claims and the normalized group set built from them.
//!
//! Group names are compared case-insensitively by normalizing both sides to
//! uppercase once, at construction. Normalization is ordinal: each `char` is
//! replaced by its single-`char` uppercase form, and kept as-is when its
//! uppercase form expands (`ß` -> `SS`, `\u{FB01}` -> `FI`), so the length
//! in chars never changes. No trimming, prefix or partial matching is ever
//! performed.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Claim type carrying group membership.
pub const GROUP_CLAIM_TYPE: &str = "group";

/// Claim type several issuers use for group membership.
pub const ROLE_CLAIM_TYPE: &str = "role";

/// A normalized, non-empty group identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Normalize a raw group value.
    ///
    /// Returns `None` for the empty string.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self(raw.chars().map(simple_uppercase).collect()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A verified `(type, value)` fact about a principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    claim_type: String,
    value: String,
}

impl Claim {
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Build a group-membership claim.
    #[must_use]
    pub fn group(value: impl Into<String>) -> Self {
        Self::new(GROUP_CLAIM_TYPE, value)
    }

    #[must_use]
    pub fn claim_type(&self) -> &str {
        &self.claim_type
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this claim expresses group membership.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.claim_type.eq_ignore_ascii_case(GROUP_CLAIM_TYPE)
            || self.claim_type.eq_ignore_ascii_case(ROLE_CLAIM_TYPE)
    }
}

/// Distinct group memberships held by a principal at decision time.
///
/// Built fresh for every decision and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    groups: BTreeSet<GroupName>,
}

impl ClaimSet {
    /// A principal with no group memberships.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw group values. Empty values are dropped.
    pub fn from_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            groups: groups
                .into_iter()
                .filter_map(|g| GroupName::new(g.as_ref()))
                .collect(),
        }
    }

    /// Build from verified claims, keeping only group-membership claims.
    #[must_use]
    pub fn from_claims(claims: &[Claim]) -> Self {
        Self::from_groups(claims.iter().filter(|c| c.is_group()).map(Claim::value))
    }

    #[must_use]
    pub fn contains(&self, group: &GroupName) -> bool {
        self.groups.contains(group)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupName> {
        self.groups.iter()
    }
}
