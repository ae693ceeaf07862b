//! The built-in catalog served when no other data source is configured.

use crate::entity::{Author, Book};
use crate::error::DomainResult;
use crate::id::{AuthorId, BookId};
use crate::store::InMemoryEntityStore;

pub fn authors() -> Vec<Author> {
    vec![
        Author::new(AuthorId::new(1), "J.K. Rowling", "jkrowling", "password"),
        Author::new(AuthorId::new(2), "Michael Crichton", "michaelcrichton", "password"),
    ]
}

pub fn books() -> Vec<Book> {
    vec![
        Book::new(BookId::new(1), "Harry Potter and the Sorcerer's stone", AuthorId::new(1)),
        Book::new(BookId::new(2), "Jurassic Park", AuthorId::new(2)),
    ]
}

pub fn catalog() -> DomainResult<InMemoryEntityStore> {
    InMemoryEntityStore::new(authors(), books())
}
