use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bookshelf_resolvers::ResolverError;

/// Map a resolver failure onto a GraphQL error.
///
/// The message is the user-facing text; `extensions.code` tells
/// `UNAUTHENTICATED` and `FORBIDDEN` apart for clients.
pub fn graphql_error(err: ResolverError) -> async_graphql::Error {
    let code = err.code();
    if let ResolverError::TokenIssuance(detail) = &err {
        tracing::error!(error = %detail, "token issuance failed");
    }
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code.to_string()))
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_error_carries_code_extension() {
        let err = graphql_error(ResolverError::Forbidden);

        assert_eq!(err.message, "You are not authorized to access this resource");
        let ext = serde_json::to_value(err.extensions.unwrap()).unwrap();
        assert_eq!(ext["code"], "FORBIDDEN");
    }
}
