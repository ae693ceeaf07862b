//! `bookshelf-auth` — pure authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and from the resolver
//! stack: it knows how to turn an author id into a signed token and a signed
//! token back into an [`Identity`], nothing more.

pub mod claims;
pub mod credentials;
pub mod identity;
pub mod token;

pub use claims::{ClaimsError, TokenClaims, validate_claims};
pub use credentials::{AuthenticationResult, Credentials};
pub use identity::Identity;
pub use token::{Hs256TokenCodec, TokenError, TokenIssuer, TokenVerifier};
