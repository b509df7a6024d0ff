//! Group policy evaluator.
//!
//! ## Decision table
//!
//! | required groups | mode  | granted when                         |
//! |-----------------|-------|--------------------------------------|
//! | empty           | *     | always                               |
//! | non-empty       | `All` | `required - claims` is empty         |
//! | non-empty       | `Any` | `required ∩ claims` is non-empty     |
//!
//! `All` is a conjunction over every required group. It is computed as a set
//! difference and must never degrade into an "at least one" check.
//!
//! Evaluation is pure: no I/O, no shared state, same inputs give the same
//! decision.

use crate::claims::ClaimSet;
use crate::decision::AccessDecision;
use crate::error::PolicyError;
use crate::policy::{AccessPolicy, PolicyDefinition, PolicyMode};

/// Stateless evaluator; safe to share across any number of requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a validated policy against a claim set.
    #[must_use]
    pub fn evaluate(claims: &ClaimSet, policy: &AccessPolicy) -> AccessDecision {
        if policy.is_unrestricted() {
            return AccessDecision::granted();
        }

        match policy.mode() {
            PolicyMode::All => {
                let missing: Vec<String> = policy
                    .required_groups()
                    .iter()
                    .filter(|g| !claims.contains(g))
                    .map(ToString::to_string)
                    .collect();
                if missing.is_empty() {
                    AccessDecision::granted()
                } else {
                    AccessDecision::missing_groups(missing)
                }
            }
            PolicyMode::Any => {
                if policy.required_groups().iter().any(|g| claims.contains(g)) {
                    AccessDecision::granted()
                } else {
                    AccessDecision::missing_groups(
                        policy
                            .required_groups()
                            .iter()
                            .map(ToString::to_string)
                            .collect(),
                    )
                }
            }
        }
    }

    /// Evaluate raw policy metadata.
    ///
    /// # Errors
    ///
    /// - [`PolicyError::Missing`] if no policy is supplied
    /// - [`PolicyError::UnrecognizedMode`] if the mode is neither `all` nor `any`
    /// - [`PolicyError::EmptyGroupName`] if a required group is empty
    pub fn evaluate_definition(
        claims: &ClaimSet,
        policy: Option<&PolicyDefinition>,
    ) -> Result<AccessDecision, PolicyError> {
        let def = policy.ok_or(PolicyError::Missing)?;
        let policy = AccessPolicy::try_from(def)?;
        Ok(Self::evaluate(claims, &policy))
    }
}

/// Shorthand for [`PolicyEvaluator::evaluate`].
#[must_use]
pub fn evaluate(claims: &ClaimSet, policy: &AccessPolicy) -> AccessDecision {
    PolicyEvaluator::evaluate(claims, policy)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::decision::DecisionReason;

    fn claims(groups: &[&str]) -> ClaimSet {
        ClaimSet::from_groups(groups)
    }

    // === Scenarios ===

    #[test]
    fn all_mode_satisfied() {
        let policy = AccessPolicy::all_of(["GROUP_A", "GROUP_B"]).unwrap();
        let d = evaluate(&claims(&["GROUP_A", "GROUP_B"]), &policy);
        assert!(d.is_granted());
        assert_eq!(d.reason(), &DecisionReason::Satisfied);
    }

    #[test]
    fn all_mode_partial_membership_is_denied() {
        let policy = AccessPolicy::all_of(["GROUP_A", "GROUP_B"]).unwrap();
        let d = evaluate(&claims(&["GROUP_A"]), &policy);
        assert!(!d.is_granted());
        assert_eq!(d.missing(), ["GROUP_B"]);
    }

    #[test]
    fn all_mode_is_not_an_any_check() {
        // Holding one of two required groups must not pass an ALL policy.
        let policy = AccessPolicy::all_of(["AUDITORGROUP", "FINANCEGROUP"]).unwrap();
        for held in [["AuditorGroup"], ["FinanceGroup"]] {
            assert!(!evaluate(&claims(&held), &policy).is_granted());
        }
        assert!(evaluate(&claims(&["AuditorGroup", "FinanceGroup"]), &policy).is_granted());
    }

    #[test]
    fn any_mode_partial_membership_is_allowed() {
        let policy = AccessPolicy::any_of(["GROUP_A", "GROUP_B"]).unwrap();
        assert!(evaluate(&claims(&["GROUP_A"]), &policy).is_granted());
    }

    #[test]
    fn any_mode_without_overlap_is_denied() {
        let policy = AccessPolicy::any_of(["GROUP_A", "GROUP_B"]).unwrap();
        let d = evaluate(&claims(&["GROUP_C"]), &policy);
        assert!(!d.is_granted());
        assert_eq!(d.missing(), ["GROUP_A", "GROUP_B"]);
    }

    #[test]
    fn no_groups_required_is_granted() {
        let policy = AccessPolicy::all_of(Vec::<String>::new()).unwrap();
        assert!(evaluate(&ClaimSet::empty(), &policy).is_granted());
        let policy = AccessPolicy::any_of(Vec::<String>::new()).unwrap();
        assert!(evaluate(&ClaimSet::empty(), &policy).is_granted());
    }

    #[test]
    fn group_less_principal_is_denied_when_groups_required() {
        let policy = AccessPolicy::any_of(["OPS"]).unwrap();
        assert!(!evaluate(&ClaimSet::empty(), &policy).is_granted());
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let policy = AccessPolicy::all_of(["FINANCE"]).unwrap();
        assert!(evaluate(&claims(&["Finance"]), &policy).is_granted());
    }

    #[test]
    fn expanding_case_mappings_do_not_match() {
        let finance = AccessPolicy::all_of(["FINANCE"]).unwrap();
        assert!(!evaluate(&claims(&["\u{FB01}nance"]), &finance).is_granted());

        let street = AccessPolicy::any_of(["STRASSE"]).unwrap();
        assert!(!evaluate(&claims(&["straße"]), &street).is_granted());
    }

    #[test]
    fn no_prefix_matching() {
        let policy = AccessPolicy::all_of(["FINANCE"]).unwrap();
        assert!(!evaluate(&claims(&["FIN", "FINANCE_READONLY"]), &policy).is_granted());
    }

    #[test]
    fn duplicate_required_groups_do_not_double_count() {
        let policy = AccessPolicy::all_of(["GROUP_A", "group_a", "GROUP_B"]).unwrap();
        let d = evaluate(&claims(&["GROUP_A"]), &policy);
        assert_eq!(d.missing(), ["GROUP_B"]);
    }

    // === Malformed input ===

    #[test]
    fn missing_definition_is_an_error() {
        assert_eq!(
            PolicyEvaluator::evaluate_definition(&claims(&["GROUP_A"]), None),
            Err(PolicyError::Missing)
        );
    }

    #[test]
    fn unrecognized_mode_is_an_error() {
        let def = PolicyDefinition {
            required_groups: vec![],
            mode: "some".to_owned(),
        };
        assert!(matches!(
            PolicyEvaluator::evaluate_definition(&ClaimSet::empty(), Some(&def)),
            Err(PolicyError::UnrecognizedMode(_))
        ));
    }

    #[test]
    fn valid_definition_evaluates() {
        let def = PolicyDefinition::new(["GROUP_A", "GROUP_B"], PolicyMode::All);
        let d = PolicyEvaluator::evaluate_definition(&claims(&["group_a"]), Some(&def)).unwrap();
        assert!(!d.is_granted());
        assert_eq!(d.missing(), ["GROUP_B"]);
    }

    // === Properties ===

    fn group_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "alpha", "Alpha", "BETA", "gamma", "Delta", "EPSILON", "zeta",
        ])
        .prop_map(str::to_owned)
    }

    fn groups_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(group_strategy(), 0..6)
    }

    fn upper(groups: &[String]) -> BTreeSet<String> {
        groups.iter().map(|g| g.to_uppercase()).collect()
    }

    proptest! {
        /// ALL is granted iff the required set is a subset of the claims.
        #[test]
        fn all_mode_is_subset(held in groups_strategy(), required in groups_strategy()) {
            let policy = AccessPolicy::all_of(&required).unwrap();
            let d = evaluate(&ClaimSet::from_groups(&held), &policy);
            prop_assert_eq!(d.is_granted(), upper(&required).is_subset(&upper(&held)));
        }

        /// ANY is granted iff the sets intersect, or nothing is required.
        #[test]
        fn any_mode_is_intersection(held in groups_strategy(), required in groups_strategy()) {
            let policy = AccessPolicy::any_of(&required).unwrap();
            let d = evaluate(&ClaimSet::from_groups(&held), &policy);
            let expected = required.is_empty()
                || !upper(&required).is_disjoint(&upper(&held));
            prop_assert_eq!(d.is_granted(), expected);
        }

        /// Empty requirements are satisfied by everyone, in either mode.
        #[test]
        fn empty_requirement_always_granted(held in groups_strategy(), use_any in any::<bool>()) {
            let mode = if use_any { PolicyMode::Any } else { PolicyMode::All };
            let policy = AccessPolicy::new(Vec::<String>::new(), mode).unwrap();
            prop_assert!(evaluate(&ClaimSet::from_groups(&held), &policy).is_granted());
        }

        /// Same inputs, same decision; insertion order is irrelevant.
        #[test]
        fn deterministic_and_order_independent(
            held in groups_strategy(),
            required in groups_strategy(),
            use_any in any::<bool>(),
        ) {
            let mode = if use_any { PolicyMode::Any } else { PolicyMode::All };
            let policy = AccessPolicy::new(&required, mode).unwrap();
            let set = ClaimSet::from_groups(&held);
            let first = evaluate(&set, &policy);
            prop_assert_eq!(&first, &evaluate(&set, &policy));

            let mut held_rev = held.clone();
            held_rev.reverse();
            let mut required_rev = required.clone();
            required_rev.reverse();
            let reversed = evaluate(
                &ClaimSet::from_groups(&held_rev),
                &AccessPolicy::new(&required_rev, mode).unwrap(),
            );
            prop_assert_eq!(first, reversed);
        }
    }
}
