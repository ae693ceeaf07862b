use bookshelf_auth::Identity;

use crate::{ResolverError, ResolverResult};

/// Per-request context handed to every resolver.
///
/// Built at request ingress and dropped when the request completes.
/// Resolvers only ever see it by shared reference.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    identity: Option<Identity>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The caller's identity, or `Unauthenticated`.
    pub fn require_identity(&self) -> ResolverResult<Identity> {
        self.identity.ok_or(ResolverError::Unauthenticated)
    }
}

impl From<Option<Identity>> for RequestContext {
    fn from(identity: Option<Identity>) -> Self {
        Self { identity }
    }
}
