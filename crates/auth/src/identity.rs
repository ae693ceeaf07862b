use serde::{Deserialize, Serialize};

use bookshelf_core::AuthorId;

use crate::TokenClaims;

/// The caller's authenticated subject for one request.
///
/// Reconstructed from a verified token on every request and never stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    author_id: AuthorId,
}

impl Identity {
    pub fn new(author_id: AuthorId) -> Self {
        Self { author_id }
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self::new(claims.sub)
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "author:{}", self.author_id)
    }
}
