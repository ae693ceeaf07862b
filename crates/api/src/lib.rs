//! HTTP API: GraphQL endpoint, identity extraction and process wiring.

pub mod app;
pub mod config;
pub mod middleware;
pub mod schema;
