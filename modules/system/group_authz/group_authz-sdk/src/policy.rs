//! Access policies attached to resources and operations.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::claims::GroupName;
use crate::error::PolicyError;

/// How required groups combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMode {
    /// The principal must hold every required group.
    All,
    /// The principal must hold at least one required group.
    Any,
}

impl PolicyMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyMode {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else if s.eq_ignore_ascii_case("any") {
            Ok(Self::Any)
        } else {
            Err(PolicyError::UnrecognizedMode(s.to_owned()))
        }
    }
}

/// Raw policy metadata as delivered by a policy store.
///
/// Not trusted until converted into an [`AccessPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDefinition {
    #[serde(default)]
    pub required_groups: Vec<String>,
    pub mode: String,
}

impl PolicyDefinition {
    #[must_use]
    pub fn new<I, S>(required_groups: I, mode: PolicyMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_groups: required_groups.into_iter().map(Into::into).collect(),
            mode: mode.as_str().to_owned(),
        }
    }
}

/// Validated group requirement of a resource.
///
/// Required groups are normalized and deduplicated. When the set is empty
/// the mode is irrelevant: there is nothing to require.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    required_groups: BTreeSet<GroupName>,
    mode: PolicyMode,
}

impl AccessPolicy {
    /// Build a policy from raw group names.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::EmptyGroupName`] if any group name is empty.
    pub fn new<I, S>(required_groups: I, mode: PolicyMode) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let required_groups = required_groups
            .into_iter()
            .map(|g| GroupName::new(g.as_ref()).ok_or(PolicyError::EmptyGroupName))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self {
            required_groups,
            mode,
        })
    }

    /// Principal must hold every listed group.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::EmptyGroupName`] if any group name is empty.
    pub fn all_of<I, S>(required_groups: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(required_groups, PolicyMode::All)
    }

    /// Principal must hold at least one listed group.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::EmptyGroupName`] if any group name is empty.
    pub fn any_of<I, S>(required_groups: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(required_groups, PolicyMode::Any)
    }

    /// No group requirement; defers to authentication alone.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self {
            required_groups: BTreeSet::new(),
            mode: PolicyMode::All,
        }
    }

    #[must_use]
    pub fn required_groups(&self) -> &BTreeSet<GroupName> {
        &self.required_groups
    }

    #[must_use]
    pub fn mode(&self) -> PolicyMode {
        self.mode
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.required_groups.is_empty()
    }
}

impl TryFrom<&PolicyDefinition> for AccessPolicy {
    type Error = PolicyError;

    fn try_from(def: &PolicyDefinition) -> Result<Self, Self::Error> {
        let mode = def.mode.parse::<PolicyMode>()?;
        Self::new(&def.required_groups, mode)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("ALL".parse::<PolicyMode>(), Ok(PolicyMode::All));
        assert_eq!("any".parse::<PolicyMode>(), Ok(PolicyMode::Any));
        assert_eq!("Any".parse::<PolicyMode>(), Ok(PolicyMode::Any));
    }

    #[test]
    fn mode_rejects_unknown_text() {
        assert_eq!(
            "either".parse::<PolicyMode>(),
            Err(PolicyError::UnrecognizedMode("either".to_owned()))
        );
        assert!("".parse::<PolicyMode>().is_err());
    }

    #[test]
    fn required_groups_are_deduplicated() {
        let policy = AccessPolicy::all_of(["GROUP_A", "group_a", "Group_B"]).unwrap();
        assert_eq!(policy.required_groups().len(), 2);
        assert_eq!(policy.mode(), PolicyMode::All);
    }

    #[test]
    fn empty_group_name_is_rejected() {
        assert_eq!(
            AccessPolicy::any_of(["GROUP_A", ""]),
            Err(PolicyError::EmptyGroupName)
        );
    }

    #[test]
    fn unrestricted_policy_has_no_groups() {
        assert!(AccessPolicy::unrestricted().is_unrestricted());
        assert!(AccessPolicy::any_of(Vec::<String>::new()).unwrap().is_unrestricted());
    }

    #[test]
    fn definition_converts_into_policy() {
        let def = PolicyDefinition::new(["Finance", "Audit"], PolicyMode::Any);
        let policy = AccessPolicy::try_from(&def).unwrap();
        assert_eq!(policy.mode(), PolicyMode::Any);
        assert_eq!(policy.required_groups().len(), 2);
    }

    #[test]
    fn definition_with_bad_mode_is_malformed() {
        let def = PolicyDefinition {
            required_groups: vec!["FINANCE".to_owned()],
            mode: "majority".to_owned(),
        };
        assert!(matches!(
            AccessPolicy::try_from(&def),
            Err(PolicyError::UnrecognizedMode(_))
        ));
    }

    #[test]
    fn definition_deserializes_with_default_groups() {
        let def: PolicyDefinition = serde_json::from_str(r#"{"mode":"all"}"#).unwrap();
        assert!(def.required_groups.is_empty());
        assert_eq!(def.mode, "all");
    }
}
