//! Unauthenticated, unmasked data access.
//!
//! These are the innermost resolvers. They never look at the caller's
//! identity and never fail beyond "not found".

use std::sync::Arc;

use chrono::Utc;

use bookshelf_auth::{AuthenticationResult, Credentials, TokenIssuer};
use bookshelf_core::{AuthorId, BookId, EntityStore};

use crate::{ResolverError, ResolverSet, resolver};

/// Build the base resolver set over an injected store and token issuer.
///
/// `authenticate` signs a token carrying the matched author's id only.
pub fn base_resolvers(store: Arc<dyn EntityStore>, issuer: Arc<dyn TokenIssuer>) -> ResolverSet {
    let authenticate = {
        let store = Arc::clone(&store);
        resolver(move |credentials: &Credentials, _ctx| {
            let matched = store
                .list_authors()
                .into_iter()
                .find(|a| a.matches_credentials(&credentials.username, &credentials.password));

            let Some(author) = matched else {
                tracing::debug!(username = %credentials.username, "no author matches credentials");
                return Ok(AuthenticationResult::rejected());
            };

            let token = issuer
                .issue(author.id, Utc::now())
                .map_err(|e| ResolverError::TokenIssuance(e.to_string()))?;
            tracing::debug!(author_id = %author.id, "issued token");

            Ok(AuthenticationResult::issued(token))
        })
    };

    let books = {
        let store = Arc::clone(&store);
        resolver(move |_: &(), _ctx| Ok(store.list_books()))
    };

    let book = {
        let store = Arc::clone(&store);
        resolver(move |id: &BookId, _ctx| Ok(store.get_book(*id)))
    };

    let authors = {
        let store = Arc::clone(&store);
        resolver(move |_: &(), _ctx| Ok(store.list_authors()))
    };

    let author = resolver(move |id: &AuthorId, _ctx| Ok(store.get_author(*id)));

    ResolverSet {
        authenticate,
        books,
        book,
        authors,
        author,
    }
}
