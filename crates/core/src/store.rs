use std::collections::HashSet;
use std::sync::Arc;

use crate::entity::{Author, Book, Entity};
use crate::error::{DomainError, DomainResult};
use crate::id::{AuthorId, BookId};

/// Read-only data source for the catalog.
///
/// Lookups by id return `None` when nothing matches; there are no other
/// failure modes. Listing preserves the store's insertion order.
pub trait EntityStore: Send + Sync {
    fn list_authors(&self) -> Vec<Author>;
    fn get_author(&self, id: AuthorId) -> Option<Author>;
    fn list_books(&self) -> Vec<Book>;
    fn get_book(&self, id: BookId) -> Option<Book>;
}

impl<S> EntityStore for Arc<S>
where
    S: EntityStore + ?Sized,
{
    fn list_authors(&self) -> Vec<Author> {
        (**self).list_authors()
    }

    fn get_author(&self, id: AuthorId) -> Option<Author> {
        (**self).get_author(id)
    }

    fn list_books(&self) -> Vec<Book> {
        (**self).list_books()
    }

    fn get_book(&self, id: BookId) -> Option<Book> {
        (**self).get_book(id)
    }
}

/// In-memory catalog, populated once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityStore {
    authors: Vec<Author>,
    books: Vec<Book>,
}

impl InMemoryEntityStore {
    /// Build a store, rejecting duplicate ids and duplicate usernames.
    ///
    /// `Book::author_id` is not checked here; see
    /// [`InMemoryEntityStore::dangling_book_references`].
    pub fn new(authors: Vec<Author>, books: Vec<Book>) -> DomainResult<Self> {
        ensure_unique_ids("author", &authors)?;
        ensure_unique_ids("book", &books)?;

        let mut usernames = HashSet::new();
        for author in &authors {
            if !usernames.insert(author.username.as_str()) {
                return Err(DomainError::invariant(format!(
                    "duplicate username '{}'",
                    author.username
                )));
            }
        }

        Ok(Self { authors, books })
    }

    /// Books whose `author_id` does not name a known author.
    pub fn dangling_book_references(&self) -> Vec<BookId> {
        let known: HashSet<AuthorId> = self.authors.iter().map(|a| a.id).collect();
        self.books
            .iter()
            .filter(|b| !known.contains(&b.author_id))
            .map(|b| b.id)
            .collect()
    }
}

fn ensure_unique_ids<E: Entity>(kind: &str, records: &[E]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(DomainError::invariant(format!(
                "duplicate {kind} id {:?}",
                record.id()
            )));
        }
    }
    Ok(())
}

impl EntityStore for InMemoryEntityStore {
    fn list_authors(&self) -> Vec<Author> {
        self.authors.clone()
    }

    fn get_author(&self, id: AuthorId) -> Option<Author> {
        self.authors.iter().find(|a| a.id == id).cloned()
    }

    fn list_books(&self) -> Vec<Book> {
        self.books.clone()
    }

    fn get_book(&self, id: BookId) -> Option<Book> {
        self.books.iter().find(|b| b.id == id).cloned()
    }
}
