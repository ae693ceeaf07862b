use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bookshelf_core::AuthorId;

/// Token claims model (transport-agnostic).
///
/// Carries the subject only. Name, username and password never travel inside
/// a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the authenticated author.
    pub sub: AuthorId,

    /// Issued-at timestamp (only present for expiring tokens).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,

    /// Expiration timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
    /// Claims for a token that never expires.
    pub fn for_subject(sub: AuthorId) -> Self {
        Self {
            sub,
            issued_at: None,
            expires_at: None,
        }
    }

    /// Claims valid from `now` for `ttl`, or `None` if the expiry is not
    /// representable.
    pub fn expiring(sub: AuthorId, now: DateTime<Utc>, ttl: chrono::Duration) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;
        Some(Self {
            sub,
            issued_at: Some(now),
            expires_at: Some(expires_at),
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification happens in
/// [`crate::token`]. Absent timestamps are not checked.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), ClaimsError> {
    if let (Some(issued_at), Some(expires_at)) = (claims.issued_at, claims.expires_at) {
        if expires_at <= issued_at {
            return Err(ClaimsError::InvalidTimeWindow);
        }
    }
    if let Some(issued_at) = claims.issued_at {
        if now < issued_at {
            return Err(ClaimsError::NotYetValid);
        }
    }
    if let Some(expires_at) = claims.expires_at {
        if now >= expires_at {
            return Err(ClaimsError::Expired);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn non_expiring_claims_always_validate() {
        let claims = TokenClaims::for_subject(AuthorId::new(1));
        assert_eq!(validate_claims(&claims, Utc::now()), Ok(()));
    }

    #[test]
    fn expiring_claims_respect_window() {
        let now = Utc::now();
        let claims = TokenClaims::expiring(AuthorId::new(1), now, Duration::minutes(5)).unwrap();

        assert_eq!(validate_claims(&claims, now), Ok(()));
        assert_eq!(
            validate_claims(&claims, now - Duration::seconds(1)),
            Err(ClaimsError::NotYetValid)
        );
        assert_eq!(
            validate_claims(&claims, now + Duration::minutes(5)),
            Err(ClaimsError::Expired)
        );
    }

    #[test]
    fn unrepresentable_expiry_is_none() {
        let ttl = Duration::seconds(10_000_000_000_000);
        assert_eq!(TokenClaims::expiring(AuthorId::new(1), Utc::now(), ttl), None);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: AuthorId::new(1),
            issued_at: Some(now),
            expires_at: Some(now - Duration::seconds(1)),
        };
        assert_eq!(validate_claims(&claims, now), Err(ClaimsError::InvalidTimeWindow));
    }

    #[test]
    fn serialized_claims_only_carry_the_subject() {
        let json = serde_json::to_value(TokenClaims::for_subject(AuthorId::new(4))).unwrap();
        assert_eq!(json, serde_json::json!({ "sub": 4 }));
    }
}
