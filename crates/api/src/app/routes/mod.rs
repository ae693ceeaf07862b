use axum::{Router, routing::get};

pub mod graphql;
pub mod system;

/// Router for the GraphQL endpoint (identity-aware).
pub fn router() -> Router {
    Router::new().route("/graphql", get(graphql::playground).post(graphql::execute))
}
