//! `bookshelf-core` — catalog records and the read-only data source.
//!
//! This crate contains **pure domain** primitives (no transport, no auth).

pub mod entity;
pub mod error;
pub mod id;
pub mod seed;
pub mod store;

pub use entity::{Author, Book, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{AuthorId, BookId};
pub use store::{EntityStore, InMemoryEntityStore};
