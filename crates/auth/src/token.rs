//! HS256 token issuance and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use bookshelf_core::AuthorId;

use crate::{ClaimsError, Identity, TokenClaims, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error(transparent)]
    Claims(#[from] ClaimsError),
}

/// Issues signed tokens for an authenticated author.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: AuthorId, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// Verifies a token and decodes it into an [`Identity`].
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError>;
}

/// Shared-secret HS256 codec implementing both halves.
///
/// Without a TTL a token is a pure function of subject and secret: the same
/// author always receives the same token.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<chrono::Duration>,
}

impl Hs256TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Time-based checks are done by `validate_claims` on our own claim names.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

impl core::fmt::Debug for Hs256TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer for Hs256TokenCodec {
    fn issue(&self, subject: AuthorId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = match self.ttl {
            Some(ttl) => TokenClaims::expiring(subject, now, ttl)
                .ok_or_else(|| TokenError::Signing(format!("expiry overflows for ttl {ttl}")))?,
            None => TokenClaims::for_subject(subject),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl TokenVerifier for Hs256TokenCodec {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        tracing::trace!(sub = %data.claims.sub, "token verified");

        Ok(Identity::from(data.claims))
    }
}
