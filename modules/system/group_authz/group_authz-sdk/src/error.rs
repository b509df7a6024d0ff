//! Error types for the `group_authz` module.

/// Malformed policy input.
///
/// Never produced for an ordinary "not authorized" outcome; that is a
/// regular denied [`crate::AccessDecision`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// No policy was supplied for the resource.
    #[error("policy is missing")]
    Missing,

    /// The combination mode is neither `all` nor `any`.
    #[error("unrecognized policy mode: {0:?}")]
    UnrecognizedMode(String),

    /// A required group name is empty.
    #[error("policy contains an empty group name")]
    EmptyGroupName,
}

/// Failure of the trusted claim source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClaimSourceError {
    /// The claim source did not respond or refused the call.
    #[error("claim source unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure of the resource policy store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PolicyStoreError {
    /// The store has no policy for the referenced resource.
    #[error("no policy for resource {0}")]
    ResourceNotFound(String),

    /// The store did not respond or refused the call.
    #[error("policy store unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}
