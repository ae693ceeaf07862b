//! HTTP application wiring (Axum router + resolver stack).
//!
//! - `routes/`: HTTP handlers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use bookshelf_auth::Hs256TokenCodec;
use bookshelf_core::EntityStore;
use bookshelf_resolvers::{base_resolvers, reference_stack};

use crate::config::AppConfig;
use crate::middleware;
use crate::schema::build_schema;

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The resolver stack is composed here, once, and shared read-only by every
/// request.
pub fn build_app(config: &AppConfig, store: Arc<dyn EntityStore>) -> Router {
    let mut codec = Hs256TokenCodec::new(config.token_secret.as_bytes());
    if let Some(ttl) = config.token_ttl {
        codec = codec.with_ttl(ttl);
    }
    let codec = Arc::new(codec);

    let base = base_resolvers(store, codec.clone());
    let stack = reference_stack(base, config.ownership_check);
    tracing::info!(ownership_check = config.ownership_check.as_str(), "book ownership check");

    let schema = build_schema(&stack);
    let identity_state = middleware::IdentityState { verifier: codec };

    let graphql = routes::router().layer(
        ServiceBuilder::new()
            .layer(Extension(schema))
            .layer(axum::middleware::from_fn_with_state(
                identity_state,
                middleware::identity_middleware,
            )),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(graphql)
}
