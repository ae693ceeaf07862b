//! The resolver set: one handler per query operation.

use std::sync::Arc;

use bookshelf_auth::{AuthenticationResult, Credentials};
use bookshelf_core::{Author, AuthorId, Book, BookId};

use crate::{RequestContext, ResolverResult};

/// A single resolver: arguments and request context in, result out.
pub type Resolver<A, T> = Arc<dyn Fn(&A, &RequestContext) -> ResolverResult<T> + Send + Sync>;

/// Wrap a closure as a [`Resolver`].
pub fn resolver<A, T, F>(f: F) -> Resolver<A, T>
where
    F: Fn(&A, &RequestContext) -> ResolverResult<T> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Names of the query operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Authenticate,
    Books,
    Book,
    Authors,
    Author,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Authenticate,
        Operation::Books,
        Operation::Book,
        Operation::Authors,
        Operation::Author,
    ];

    /// Field name on the query root.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Authenticate => "authenticate",
            Operation::Books => "books",
            Operation::Book => "book",
            Operation::Authors => "authors",
            Operation::Author => "author",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A complete set of resolvers, one per [`Operation`].
///
/// Cloning is cheap (every handler is an `Arc`). A set is never mutated once
/// built; layers produce new sets instead.
#[derive(Clone)]
pub struct ResolverSet {
    pub(crate) authenticate: Resolver<Credentials, AuthenticationResult>,
    pub(crate) books: Resolver<(), Vec<Book>>,
    pub(crate) book: Resolver<BookId, Option<Book>>,
    pub(crate) authors: Resolver<(), Vec<Author>>,
    pub(crate) author: Resolver<AuthorId, Option<Author>>,
}

impl ResolverSet {
    pub fn authenticate(&self, credentials: &Credentials, ctx: &RequestContext) -> ResolverResult<AuthenticationResult> {
        (self.authenticate)(credentials, ctx)
    }

    pub fn books(&self, ctx: &RequestContext) -> ResolverResult<Vec<Book>> {
        (self.books)(&(), ctx)
    }

    pub fn book(&self, id: BookId, ctx: &RequestContext) -> ResolverResult<Option<Book>> {
        (self.book)(&id, ctx)
    }

    pub fn authors(&self, ctx: &RequestContext) -> ResolverResult<Vec<Author>> {
        (self.authors)(&(), ctx)
    }

    pub fn author(&self, id: AuthorId, ctx: &RequestContext) -> ResolverResult<Option<Author>> {
        (self.author)(&id, ctx)
    }
}

impl core::fmt::Debug for ResolverSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResolverSet").finish_non_exhaustive()
    }
}
