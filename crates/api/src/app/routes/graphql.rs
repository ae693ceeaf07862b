use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::Extension, response::Html};

use bookshelf_resolvers::RequestContext;

use crate::schema::BookshelfSchema;

pub async fn execute(
    Extension(schema): Extension<BookshelfSchema>,
    Extension(ctx): Extension<RequestContext>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner().data(ctx)).await.into()
}

/// Interactive query editor.
pub async fn playground() -> Html<String> {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
