use thiserror::Error;

/// Result type returned by every resolver.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Failures a resolver may raise.
///
/// Not-found is never an error (lookups return `None`) and failed
/// credentials are an `AuthenticationResult` without a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The operation needs an identity and the request carried none.
    #[error("This resource requires an authentication token")]
    Unauthenticated,

    /// The caller is known but may not see the requested resource.
    #[error("You are not authorized to access this resource")]
    Forbidden,

    /// Signing a token for a successful login failed.
    #[error("failed to issue token: {0}")]
    TokenIssuance(String),
}

impl ResolverError {
    /// Stable machine-readable code surfaced to clients.
    pub fn code(&self) -> &'static str {
        match self {
            ResolverError::Unauthenticated => "UNAUTHENTICATED",
            ResolverError::Forbidden => "FORBIDDEN",
            ResolverError::TokenIssuance(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}
