//! Per-author data isolation for books.

use std::sync::Arc;

use crate::{Delegation, Layer, PartialResolverSet, ResolverError, ResolverSet};

/// How `book(id)` decides ownership.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BookOwnershipCheck {
    /// Fetch the book through the previous layer and compare its author to the
    /// caller. A missing book stays `None`.
    #[default]
    BookAuthor,

    /// Compare the requested *book* id with the caller's *author* id before
    /// fetching anything. Wrong in general; kept for clients that rely on the
    /// legacy behavior.
    LiteralBookId,
}

impl BookOwnershipCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            BookOwnershipCheck::BookAuthor => "book_author",
            BookOwnershipCheck::LiteralBookId => "literal_book_id",
        }
    }
}

/// Denies access to books the caller does not own.
///
/// - `books`: requires an identity; filters the previous result to the
///   caller's books, keeping order. An empty result is not an error.
/// - `book`: requires an identity; gated per [`BookOwnershipCheck`].
#[derive(Debug, Copy, Clone, Default)]
pub struct DenyAccessToUnownedBooks {
    check: BookOwnershipCheck,
}

impl DenyAccessToUnownedBooks {
    pub fn new(check: BookOwnershipCheck) -> Self {
        Self { check }
    }
}

impl Layer for DenyAccessToUnownedBooks {
    fn name(&self) -> &'static str {
        "deny_access_to_unowned_books"
    }

    fn apply(&self, previous: Arc<ResolverSet>) -> PartialResolverSet {
        let check = self.check;
        let books_previous = Arc::clone(&previous);

        PartialResolverSet::new()
            .with_books(Delegation::Filtered, move |_, ctx| {
                let caller = ctx.require_identity()?.author_id();
                let books = books_previous.books(ctx)?;
                Ok(books.into_iter().filter(|b| b.is_owned_by(caller)).collect())
            })
            .with_book(Delegation::Filtered, move |id, ctx| {
                let caller = ctx.require_identity()?.author_id();

                match check {
                    BookOwnershipCheck::LiteralBookId => {
                        if id.get() != caller.get() {
                            tracing::debug!(operation = "book", book_id = %id, author_id = %caller, "access denied");
                            return Err(ResolverError::Forbidden);
                        }
                        previous.book(*id, ctx)
                    }
                    BookOwnershipCheck::BookAuthor => match previous.book(*id, ctx)? {
                        Some(book) if !book.is_owned_by(caller) => {
                            tracing::debug!(operation = "book", book_id = %id, author_id = %caller, "access denied");
                            Err(ResolverError::Forbidden)
                        }
                        found => Ok(found),
                    },
                }
            })
    }
}
