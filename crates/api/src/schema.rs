//! GraphQL schema over the composed resolver set.
//!
//! Field and argument names follow the public query surface
//! (`authenticate`, `books`, `book`, `authors`, `author`; `authorId` on
//! `Book`). Every field delegates to the shared [`ResolverSet`] with the
//! request's [`RequestContext`].

use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, InputObject, Object, Schema, SimpleObject};

use bookshelf_auth::{AuthenticationResult, Credentials};
use bookshelf_core::{Author, AuthorId, Book, BookId};
use bookshelf_resolvers::{RequestContext, ResolverSet, Stack};

use crate::app::errors::graphql_error;

pub type BookshelfSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub fn build_schema(stack: &Stack) -> BookshelfSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(stack.shared())
        .finish()
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Author")]
pub struct AuthorObject {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub password: String,
}

impl From<Author> for AuthorObject {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.get(),
            name: author.name,
            username: author.username,
            password: author.password,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Book")]
pub struct BookObject {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
}

impl From<Book> for BookObject {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.get(),
            title: book.title,
            author_id: book.author_id.get(),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct AuthorCredentials {
    pub username: String,
    pub password: String,
}

impl From<AuthorCredentials> for Credentials {
    fn from(input: AuthorCredentials) -> Self {
        Credentials::new(input.username, input.password)
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "AuthenticationResult")]
pub struct AuthenticationResultObject {
    pub token: Option<String>,
}

impl From<AuthenticationResult> for AuthenticationResultObject {
    fn from(result: AuthenticationResult) -> Self {
        Self { token: result.token }
    }
}

pub struct Query;

fn resolvers<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a Arc<ResolverSet>> {
    ctx.data::<Arc<ResolverSet>>()
}

fn request_context(ctx: &Context<'_>) -> RequestContext {
    ctx.data_opt::<RequestContext>().copied().unwrap_or_default()
}

#[Object]
impl Query {
    async fn authenticate(
        &self,
        ctx: &Context<'_>,
        credentials: AuthorCredentials,
    ) -> async_graphql::Result<AuthenticationResultObject> {
        let result = resolvers(ctx)?
            .authenticate(&credentials.into(), &request_context(ctx))
            .map_err(graphql_error)?;
        Ok(result.into())
    }

    async fn books(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<BookObject>> {
        let books = resolvers(ctx)?
            .books(&request_context(ctx))
            .map_err(graphql_error)?;
        Ok(books.into_iter().map(BookObject::from).collect())
    }

    async fn book(&self, ctx: &Context<'_>, id: i32) -> async_graphql::Result<Option<BookObject>> {
        let book = resolvers(ctx)?
            .book(BookId::new(id), &request_context(ctx))
            .map_err(graphql_error)?;
        Ok(book.map(BookObject::from))
    }

    async fn authors(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<AuthorObject>> {
        let authors = resolvers(ctx)?
            .authors(&request_context(ctx))
            .map_err(graphql_error)?;
        Ok(authors.into_iter().map(AuthorObject::from).collect())
    }

    async fn author(&self, ctx: &Context<'_>, id: i32) -> async_graphql::Result<Option<AuthorObject>> {
        let author = resolvers(ctx)?
            .author(AuthorId::new(id), &request_context(ctx))
            .map_err(graphql_error)?;
        Ok(author.map(AuthorObject::from))
    }
}
