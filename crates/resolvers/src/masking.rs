//! Redaction of author credentials.

use std::sync::Arc;

use bookshelf_core::Author;

use crate::{Delegation, Layer, PartialResolverSet, ResolverSet};

/// Placeholder substituted for a redacted field.
pub const REDACTION_MARKER: &str = "****";

/// Replace the password with [`REDACTION_MARKER`], leaving everything else.
pub fn redact(author: Author) -> Author {
    Author {
        password: REDACTION_MARKER.to_string(),
        ..author
    }
}

/// Masks `password` on every author returned by `authors` and `author`.
///
/// Never consults the identity and never denies.
#[derive(Debug, Copy, Clone, Default)]
pub struct MaskSensitiveFields;

impl Layer for MaskSensitiveFields {
    fn name(&self) -> &'static str {
        "mask_sensitive_fields"
    }

    fn apply(&self, previous: Arc<ResolverSet>) -> PartialResolverSet {
        let authors_previous = Arc::clone(&previous);

        PartialResolverSet::new()
            .with_authors(Delegation::Filtered, move |_, ctx| {
                Ok(authors_previous.authors(ctx)?.into_iter().map(redact).collect())
            })
            .with_author(Delegation::Filtered, move |id, ctx| {
                Ok(previous.author(*id, ctx)?.map(redact))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_auth::Hs256TokenCodec;
    use bookshelf_core::AuthorId;

    use crate::{RequestContext, base_resolvers};

    fn masked() -> ResolverSet {
        let store = Arc::new(bookshelf_core::seed::catalog().unwrap());
        let base = Arc::new(base_resolvers(store, Arc::new(Hs256TokenCodec::new("secret"))));
        MaskSensitiveFields.apply(Arc::clone(&base)).merge_over(&base)
    }

    #[test]
    fn authors_are_redacted() {
        let authors = masked().authors(&RequestContext::anonymous()).unwrap();

        assert_eq!(authors.len(), 2);
        assert!(authors.iter().all(|a| a.password == REDACTION_MARKER));
        assert_eq!(authors[0].username, "jkrowling");
        assert_eq!(authors[1].name, "Michael Crichton");
    }

    #[test]
    fn single_author_is_redacted_and_missing_stays_missing() {
        let set = masked();
        let ctx = RequestContext::anonymous();

        let author = set.author(AuthorId::new(1), &ctx).unwrap().unwrap();
        assert_eq!(author.password, REDACTION_MARKER);
        assert_eq!(author.name, "J.K. Rowling");

        assert_eq!(set.author(AuthorId::new(3), &ctx), Ok(None));
    }

    #[test]
    fn books_pass_through() {
        let books = masked().books(&RequestContext::anonymous()).unwrap();
        assert_eq!(books.len(), 2);
    }
}
