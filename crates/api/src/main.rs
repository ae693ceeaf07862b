use std::sync::Arc;

use anyhow::Context as _;

use bookshelf_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    bookshelf_observability::init(config.log_format);

    if config.uses_default_secret() {
        tracing::warn!("TOKEN_SECRET not set; using insecure dev default");
    }

    let catalog = bookshelf_core::seed::catalog()?;
    let dangling = catalog.dangling_book_references();
    if !dangling.is_empty() {
        tracing::warn!(books = ?dangling, "books reference unknown authors");
    }

    let app = bookshelf_api::app::build_app(&config, Arc::new(catalog));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
