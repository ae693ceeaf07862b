//! `bookshelf-resolvers` — the query operations and the policy layers
//! stacked on top of them.
//!
//! The pieces, innermost first:
//! - [`base`]: plain data access against an [`EntityStore`](bookshelf_core::EntityStore).
//! - [`layer`]: the contract a policy layer implements.
//! - [`authorization`] and [`masking`]: the two policy layers.
//! - [`compose`]: folds an ordered list of layers over the base set, once.

pub mod authorization;
pub mod base;
pub mod compose;
pub mod context;
pub mod error;
pub mod layer;
pub mod masking;
pub mod set;

pub use authorization::{BookOwnershipCheck, DenyAccessToUnownedBooks};
pub use base::base_resolvers;
pub use compose::{BASE_PROVIDER, Stack, StackBuilder, compose, reference_stack};
pub use context::RequestContext;
pub use error::{ResolverError, ResolverResult};
pub use layer::{Delegation, FnLayer, Layer, Override, PartialResolverSet};
pub use masking::{MaskSensitiveFields, REDACTION_MARKER, redact};
pub use set::{Operation, Resolver, ResolverSet, resolver};
