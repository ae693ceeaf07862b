//! The contract every policy layer implements.
//!
//! A layer receives the set composed so far ("previous") and returns a
//! [`PartialResolverSet`] overriding some operations. Overrides close over
//! `previous` and may call through to it any number of times, including
//! zero to deny. Arguments and context arrive by shared reference, so a
//! layer cannot alter what inner layers see.

use std::sync::Arc;

use bookshelf_auth::{AuthenticationResult, Credentials};
use bookshelf_core::{Author, AuthorId, Book, BookId};

use crate::{Operation, RequestContext, Resolver, ResolverResult, ResolverSet, resolver};

/// How much of the previous layer's behavior an override keeps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Delegation {
    /// Calls through and returns the previous result untouched.
    Full,
    /// Calls through (or refuses to), then narrows, gates or rewrites the result.
    Filtered,
    /// Never calls through.
    Replaced,
}

/// One overridden operation plus its declared delegation.
pub struct Override<A, T> {
    pub(crate) resolver: Resolver<A, T>,
    pub(crate) delegation: Delegation,
}

impl<A, T> Override<A, T> {
    pub fn new<F>(delegation: Delegation, f: F) -> Self
    where
        F: Fn(&A, &RequestContext) -> ResolverResult<T> + Send + Sync + 'static,
    {
        Self {
            resolver: resolver(f),
            delegation,
        }
    }

    pub fn delegation(&self) -> Delegation {
        self.delegation
    }
}

/// The operations a layer overrides. Anything left `None` is inherited.
#[derive(Default)]
pub struct PartialResolverSet {
    authenticate: Option<Override<Credentials, AuthenticationResult>>,
    books: Option<Override<(), Vec<Book>>>,
    book: Option<Override<BookId, Option<Book>>>,
    authors: Option<Override<(), Vec<Author>>>,
    author: Option<Override<AuthorId, Option<Author>>>,
}

impl PartialResolverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authenticate<F>(mut self, delegation: Delegation, f: F) -> Self
    where
        F: Fn(&Credentials, &RequestContext) -> ResolverResult<AuthenticationResult> + Send + Sync + 'static,
    {
        self.authenticate = Some(Override::new(delegation, f));
        self
    }

    pub fn with_books<F>(mut self, delegation: Delegation, f: F) -> Self
    where
        F: Fn(&(), &RequestContext) -> ResolverResult<Vec<Book>> + Send + Sync + 'static,
    {
        self.books = Some(Override::new(delegation, f));
        self
    }

    pub fn with_book<F>(mut self, delegation: Delegation, f: F) -> Self
    where
        F: Fn(&BookId, &RequestContext) -> ResolverResult<Option<Book>> + Send + Sync + 'static,
    {
        self.book = Some(Override::new(delegation, f));
        self
    }

    pub fn with_authors<F>(mut self, delegation: Delegation, f: F) -> Self
    where
        F: Fn(&(), &RequestContext) -> ResolverResult<Vec<Author>> + Send + Sync + 'static,
    {
        self.authors = Some(Override::new(delegation, f));
        self
    }

    pub fn with_author<F>(mut self, delegation: Delegation, f: F) -> Self
    where
        F: Fn(&AuthorId, &RequestContext) -> ResolverResult<Option<Author>> + Send + Sync + 'static,
    {
        self.author = Some(Override::new(delegation, f));
        self
    }

    /// Overridden operations with their declared delegation, in
    /// [`Operation::ALL`] order.
    pub fn declarations(&self) -> Vec<(Operation, Delegation)> {
        let declared = [
            (Operation::Authenticate, self.authenticate.as_ref().map(Override::delegation)),
            (Operation::Books, self.books.as_ref().map(Override::delegation)),
            (Operation::Book, self.book.as_ref().map(Override::delegation)),
            (Operation::Authors, self.authors.as_ref().map(Override::delegation)),
            (Operation::Author, self.author.as_ref().map(Override::delegation)),
        ];
        declared
            .into_iter()
            .filter_map(|(op, delegation)| delegation.map(|d| (op, d)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations().is_empty()
    }

    /// Overlay these overrides on `previous`, keeping its handler for every
    /// operation not overridden here.
    pub fn merge_over(self, previous: &ResolverSet) -> ResolverSet {
        ResolverSet {
            authenticate: pick(self.authenticate, &previous.authenticate),
            books: pick(self.books, &previous.books),
            book: pick(self.book, &previous.book),
            authors: pick(self.authors, &previous.authors),
            author: pick(self.author, &previous.author),
        }
    }
}

fn pick<A, T>(overridden: Option<Override<A, T>>, inherited: &Resolver<A, T>) -> Resolver<A, T> {
    match overridden {
        Some(o) => o.resolver,
        None => Arc::clone(inherited),
    }
}

/// A policy transformation over a resolver set.
pub trait Layer: Send + Sync {
    /// Short name used in logs and in [`crate::Stack::provider`].
    fn name(&self) -> &'static str;

    /// Produce overrides that may call through to `previous`.
    fn apply(&self, previous: Arc<ResolverSet>) -> PartialResolverSet;
}

/// A layer built from a closure.
pub struct FnLayer<F> {
    name: &'static str,
    f: F,
}

impl<F> FnLayer<F>
where
    F: Fn(Arc<ResolverSet>) -> PartialResolverSet + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Layer for FnLayer<F>
where
    F: Fn(Arc<ResolverSet>) -> PartialResolverSet + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, previous: Arc<ResolverSet>) -> PartialResolverSet {
        (self.f)(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResolverError, base_resolvers};
    use bookshelf_auth::Hs256TokenCodec;

    fn base() -> ResolverSet {
        let store = Arc::new(bookshelf_core::seed::catalog().unwrap());
        base_resolvers(store, Arc::new(Hs256TokenCodec::new("secret")))
    }

    #[test]
    fn declarations_list_only_overridden_operations() {
        let partial = PartialResolverSet::new()
            .with_author(Delegation::Full, |_, _| Ok(None))
            .with_books(Delegation::Replaced, |_, _| Ok(Vec::new()));

        assert_eq!(
            partial.declarations(),
            vec![
                (Operation::Books, Delegation::Replaced),
                (Operation::Author, Delegation::Full),
            ]
        );
        assert!(PartialResolverSet::new().is_empty());
    }

    #[test]
    fn merge_keeps_inherited_operations() {
        let previous = base();
        let merged = PartialResolverSet::new()
            .with_books(Delegation::Replaced, |_, _| Err(ResolverError::Forbidden))
            .merge_over(&previous);
        let ctx = RequestContext::anonymous();

        assert_eq!(merged.books(&ctx), Err(ResolverError::Forbidden));
        assert_eq!(merged.authors(&ctx).unwrap().len(), 2);
        assert!(merged.book(BookId::new(1), &ctx).unwrap().is_some());
    }

    #[test]
    fn fn_layer_sees_previous_set() {
        let layer = FnLayer::new("reverse_books", |previous: Arc<ResolverSet>| {
            PartialResolverSet::new().with_books(Delegation::Filtered, move |_, ctx| {
                let mut books = previous.books(ctx)?;
                books.reverse();
                Ok(books)
            })
        });
        let previous = Arc::new(base());

        let merged = layer.apply(Arc::clone(&previous)).merge_over(&previous);
        let ids: Vec<i32> = merged
            .books(&RequestContext::anonymous())
            .unwrap()
            .iter()
            .map(|b| b.id.get())
            .collect();

        assert_eq!(layer.name(), "reverse_books");
        assert_eq!(ids, vec![2, 1]);
    }
}
