//! Catalog records.

use serde::{Deserialize, Serialize};

use crate::id::{AuthorId, BookId};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// An author account.
///
/// `password` is a plain-text credential (no hashing in this catalog). It is
/// only ever shown to callers after the masking layer has redacted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub username: String,
    pub password: String,
}

impl Author {
    pub fn new(
        id: AuthorId,
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive credential match.
    pub fn matches_credentials(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Entity for Author {
    type Id = AuthorId;

    fn id(&self) -> AuthorId {
        self.id
    }
}

/// A book, owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author_id: AuthorId,
}

impl Book {
    pub fn new(id: BookId, title: impl Into<String>, author_id: AuthorId) -> Self {
        Self {
            id,
            title: title.into(),
            author_id,
        }
    }

    pub fn is_owned_by(&self, author_id: AuthorId) -> bool {
        self.author_id == author_id
    }
}

impl Entity for Book {
    type Id = BookId;

    fn id(&self) -> BookId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_match_is_case_sensitive() {
        let author = Author::new(AuthorId::new(1), "J.K. Rowling", "jkrowling", "password");
        assert!(author.matches_credentials("jkrowling", "password"));
        assert!(!author.matches_credentials("JKRowling", "password"));
        assert!(!author.matches_credentials("jkrowling", "Password"));
    }

    #[test]
    fn ownership_compares_author_ids() {
        let book = Book::new(BookId::new(2), "Jurassic Park", AuthorId::new(2));
        assert!(book.is_owned_by(AuthorId::new(2)));
        assert!(!book.is_owned_by(AuthorId::new(1)));
    }
}
