//! Request-side models for the `group_authz` module.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The actor making a request, as handed over by the authentication layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Verified subject identifier; `None` for anonymous callers.
    pub subject_id: Option<Uuid>,
    /// Subject type (e.g., "user", "service").
    pub subject_type: Option<String>,
}

impl Principal {
    /// A caller without a verified identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(subject_id: Uuid) -> Self {
        Self {
            subject_id: Some(subject_id),
            subject_type: None,
        }
    }

    #[must_use]
    pub fn with_subject_type(mut self, subject_type: impl Into<String>) -> Self {
        self.subject_type = Some(subject_type.into());
        self
    }

    /// Verified subject id. The nil UUID counts as anonymous.
    #[must_use]
    pub fn verified_subject_id(&self) -> Option<Uuid> {
        self.subject_id.filter(|id| !id.is_nil())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.verified_subject_id().is_some()
    }
}

/// Reference to a protected resource or operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Dotted resource type name (e.g. `"reports.audit"`).
    pub resource_type: String,
    /// Operation on the resource (e.g. `"read"`, `"delete"`).
    #[serde(default)]
    pub action: Option<String>,
    /// Specific resource instance, when known.
    #[serde(default)]
    pub id: Option<Uuid>,
}

impl ResourceRef {
    #[must_use]
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            action: None,
            id: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_type)?;
        if let Some(action) = &self.action {
            write!(f, ":{action}")?;
        }
        if let Some(id) = self.id {
            write!(f, "/{id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn uuid(s: &str) -> Uuid {
        Uuid::parse_str(s).expect("valid test UUID")
    }

    #[test]
    fn anonymous_is_not_authenticated() {
        assert!(!Principal::anonymous().is_authenticated());
    }

    #[test]
    fn nil_subject_is_not_authenticated() {
        assert!(!Principal::authenticated(Uuid::nil()).is_authenticated());
    }

    #[test]
    fn subject_is_authenticated() {
        let id = uuid("11111111-1111-1111-1111-111111111111");
        let p = Principal::authenticated(id).with_subject_type("user");
        assert!(p.is_authenticated());
        assert_eq!(p.verified_subject_id(), Some(id));
        assert_eq!(p.subject_type.as_deref(), Some("user"));
    }

    #[test]
    fn resource_ref_display() {
        let id = uuid("33333333-3333-3333-3333-333333333333");
        assert_eq!(ResourceRef::new("reports.audit").to_string(), "reports.audit");
        assert_eq!(
            ResourceRef::new("reports.audit")
                .with_action("read")
                .with_id(id)
                .to_string(),
            "reports.audit:read/33333333-3333-3333-3333-333333333333"
        );
    }
}
